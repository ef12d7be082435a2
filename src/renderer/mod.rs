//! Drawing collaborator contract
//!
//! The simulation never reads pixels. It only issues draw calls against a
//! `Canvas` using its own position state.

pub mod hud;
pub mod sprites;

pub use hud::{HudSnapshot, paint_hud};
pub use sprites::{Sprite, SpriteKey, SpriteRegistry};

use glam::Vec2;

/// How a sprite is composited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Alpha,
    /// Used for the player's hit/pickup flash
    Additive,
}

/// Anything the scene can draw onto
pub trait Canvas {
    /// Current drawable width (the HUD anchors to the right edge)
    fn width(&self) -> f32;

    fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2, blend: BlendMode);

    /// Bitmap text; `highlight` draws it on a translucent backing
    fn draw_text(&mut self, text: &str, pos: Vec2, highlight: bool);

    /// Small filled circle (life markers)
    fn draw_pip(&mut self, center: Vec2, radius: f32);
}

/// Headless canvas: counts draw calls and traces them through `log`
#[derive(Debug, Clone, Default)]
pub struct TraceCanvas {
    width: f32,
    pub sprite_calls: usize,
    pub text_calls: usize,
    pub pip_calls: usize,
}

impl TraceCanvas {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Total draw calls issued since the last reset
    pub fn total_calls(&self) -> usize {
        self.sprite_calls + self.text_calls + self.pip_calls
    }

    /// Start a new frame
    pub fn reset(&mut self) {
        self.sprite_calls = 0;
        self.text_calls = 0;
        self.pip_calls = 0;
    }
}

impl Canvas for TraceCanvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn draw_sprite(&mut self, sprite: &Sprite, pos: Vec2, blend: BlendMode) {
        log::trace!(
            "sprite {} at ({:.1}, {:.1}) flipped={} {:?}",
            sprite.asset(),
            pos.x,
            pos.y,
            sprite.flipped(),
            blend
        );
        self.sprite_calls += 1;
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, _highlight: bool) {
        log::trace!("text {:?} at ({:.1}, {:.1})", text, pos.x, pos.y);
        self.text_calls += 1;
    }

    fn draw_pip(&mut self, center: Vec2, radius: f32) {
        log::trace!("pip r={} at ({:.1}, {:.1})", radius, center.x, center.y);
        self.pip_calls += 1;
    }
}
