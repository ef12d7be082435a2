//! Sprite templates
//!
//! The registry holds one immutable template per key. Spawning hands out a
//! clone, so flipping one fish never touches the template or its siblings.

use std::collections::HashMap;
use std::sync::Arc;

use crate::sim::{FishKind, PowerUpKind};

/// Per-instance sprite handle (cheap to clone: the asset path is shared)
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    asset: Arc<str>,
    width: f32,
    height: f32,
    flipped: bool,
}

impl Sprite {
    pub fn new(asset: &str, width: f32, height: f32) -> Self {
        Self {
            asset: Arc::from(asset),
            width,
            height,
            flipped: false,
        }
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }
}

/// What a template is registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Player,
    PlayerFlash,
    Fish(FishKind),
    PowerUp(PowerUpKind),
}

/// Template lookup shared by the world and the scene
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    templates: HashMap<SpriteKey, Sprite>,
}

impl SpriteRegistry {
    /// Registry with no templates; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock artwork set
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.insert(SpriteKey::Player, Sprite::new("fish.png", 70.0, 70.0));
        registry.insert(SpriteKey::PlayerFlash, Sprite::new("white-fish.png", 70.0, 70.0));
        registry.insert(
            SpriteKey::Fish(FishKind::Common),
            Sprite::new("base-fish.png", 70.0, 70.0),
        );
        registry.insert(
            SpriteKey::Fish(FishKind::Bigger),
            Sprite::new("bigger-fish.png", 120.0, 120.0),
        );
        registry.insert(
            SpriteKey::Fish(FishKind::Fast),
            Sprite::new("fast-fish.png", 70.0, 70.0),
        );
        registry.insert(
            SpriteKey::Fish(FishKind::Armored),
            Sprite::new("armored-fish.png", 90.0, 90.0),
        );
        registry.insert(
            SpriteKey::PowerUp(PowerUpKind::Speed),
            Sprite::new("speed_powerup.png", 40.0, 40.0),
        );
        registry.insert(
            SpriteKey::PowerUp(PowerUpKind::Power),
            Sprite::new("power_powerup.png", 40.0, 40.0),
        );
        registry.insert(
            SpriteKey::PowerUp(PowerUpKind::Size),
            Sprite::new("size_powerup.png", 40.0, 40.0),
        );
        registry
    }

    /// Register or replace a template
    pub fn insert(&mut self, key: SpriteKey, template: Sprite) {
        self.templates.insert(key, template);
    }

    /// Fresh copy of the template for `key`, if one is registered
    pub fn sprite(&self, key: SpriteKey) -> Option<Sprite> {
        self.templates.get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_are_independent_of_template() {
        let registry = SpriteRegistry::with_defaults();
        let mut first = registry
            .sprite(SpriteKey::Fish(FishKind::Common))
            .expect("default template");
        let second = registry
            .sprite(SpriteKey::Fish(FishKind::Common))
            .expect("default template");

        first.set_flipped(true);
        assert!(!second.flipped());
        assert!(
            !registry
                .sprite(SpriteKey::Fish(FishKind::Common))
                .expect("default template")
                .flipped()
        );
        assert_eq!(first.asset(), "base-fish.png");
    }

    #[test]
    fn test_defaults_cover_every_kind() {
        let registry = SpriteRegistry::with_defaults();
        for kind in FishKind::ALL {
            assert!(registry.sprite(SpriteKey::Fish(kind)).is_some());
        }
        for kind in PowerUpKind::ALL {
            assert!(registry.sprite(SpriteKey::PowerUp(kind)).is_some());
        }
        assert_eq!(registry.len(), 9);
        assert!(SpriteRegistry::empty().sprite(SpriteKey::Player).is_none());
    }
}
