//! The world: live fish, power-ups and the level cycle
//!
//! The world exclusively owns its entity lists. Other code refers to
//! entities by `EntityId` and asks the world to remove them.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::resolve_pairwise;
use super::level::AquariumLevel;
use super::state::{Creature, EntityId, FishKind, PowerUpKind};
use crate::consts::*;
use crate::renderer::{Canvas, SpriteKey, SpriteRegistry};
use crate::unit_direction;

/// The aquarium world
#[derive(Debug, Clone)]
pub struct Aquarium {
    width: u32,
    height: u32,
    /// Live fish in spawn order
    creatures: Vec<Creature>,
    power_ups: Vec<Creature>,
    levels: Vec<AquariumLevel>,
    /// Monotonic level counter; the active level is `current_level % levels.len()`
    current_level: usize,
    sprites: Arc<SpriteRegistry>,
    rng: Pcg32,
    next_id: u32,
}

impl Aquarium {
    pub fn new(width: u32, height: u32, sprites: Arc<SpriteRegistry>, seed: u64) -> Self {
        Self {
            width,
            height,
            creatures: Vec::new(),
            power_ups: Vec::new(),
            levels: Vec::new(),
            current_level: 0,
            sprites,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Bounds stamped onto fish: the world minus the sprite margin
    fn creature_bounds(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 - SPRITE_MARGIN,
            self.height as f32 - SPRITE_MARGIN,
        )
    }

    // --- Bounds ---

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize. Live entities keep their bounds snapshot; new ones get the new size.
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    // --- Creatures ---

    /// Take ownership of a creature, assign it an id and stamp the world bounds
    pub fn add_creature(&mut self, mut creature: Creature) -> EntityId {
        creature.id = self.next_entity_id();
        creature.body.bounds = self.creature_bounds();
        let id = creature.id;
        self.creatures.push(creature);
        id
    }

    /// Remove a creature. Fish removals are credited to the active level.
    pub fn remove_creature(&mut self, id: EntityId) -> Option<Creature> {
        let index = self.creatures.iter().position(|c| c.id == id)?;
        let creature = self.creatures.remove(index);
        if let (Some(kind), Some(level)) = (creature.fish_kind(), self.current_level_mut()) {
            level.consume_population(kind, creature.value);
        }
        Some(creature)
    }

    pub fn clear_creatures(&mut self) {
        self.creatures.clear();
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    /// Creature at list index `i`, `None` when out of range
    pub fn creature_at(&self, i: usize) -> Option<&Creature> {
        self.creatures.get(i)
    }

    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// Spawn one fish at a random spot with a random speed in [1, 25]
    pub fn spawn_creature(&mut self, kind: FishKind) -> EntityId {
        let x = self.rng.random_range(0..self.width.max(1));
        let y = self.rng.random_range(0..self.height.max(1));
        let speed = self.rng.random_range(SPAWN_SPEED_MIN..=SPAWN_SPEED_MAX);
        let dx = self.rng.random_range(-1i32..=1);
        let dy = self.rng.random_range(-1i32..=1);

        let sprite = self.sprites.sprite(SpriteKey::Fish(kind));
        let fish = Creature::fish(
            kind,
            Vec2::new(x as f32, y as f32),
            speed as f32,
            unit_direction(dx as f32, dy as f32),
            sprite,
        );
        let id = self.add_creature(fish);
        log::debug!("Spawned {} {:?} at ({}, {}) speed {}", kind, id, x, y, speed);
        id
    }

    // --- Power-ups ---

    /// Spawn a power-up in the upper half of the world
    pub fn spawn_power_up(&mut self, kind: PowerUpKind) -> EntityId {
        let x = self.rng.random_range(0..self.width.max(1));
        let y = self.rng.random_range(0..(self.height / 2).max(1));

        let pickup = Creature::power_up(
            kind,
            Vec2::new(x as f32, y as f32),
            self.sprites.sprite(SpriteKey::PowerUp(kind)),
        );
        let id = self.add_power_up(pickup);
        log::debug!("Spawned {} power-up {:?} at ({}, {})", kind, id, x, y);
        id
    }

    /// Take ownership of a power-up; it drifts through the full world height
    pub fn add_power_up(&mut self, mut pickup: Creature) -> EntityId {
        pickup.id = self.next_entity_id();
        pickup.body.bounds = Vec2::new(self.width as f32, self.height as f32);
        let id = pickup.id;
        self.power_ups.push(pickup);
        id
    }

    /// Spawn a power-up of a uniformly random kind
    pub fn spawn_random_power_up(&mut self) -> EntityId {
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        self.spawn_power_up(kind)
    }

    pub fn remove_power_up(&mut self, id: EntityId) -> Option<Creature> {
        let index = self.power_ups.iter().position(|p| p.id == id)?;
        Some(self.power_ups.remove(index))
    }

    pub fn power_ups(&self) -> &[Creature] {
        &self.power_ups
    }

    // --- Levels ---

    pub fn add_level(&mut self, level: AquariumLevel) {
        self.levels.push(level);
    }

    pub fn levels(&self) -> &[AquariumLevel] {
        &self.levels
    }

    /// Number of levels advanced so far (not wrapped)
    pub fn levels_advanced(&self) -> usize {
        self.current_level
    }

    fn current_index(&self) -> Option<usize> {
        (!self.levels.is_empty()).then(|| self.current_level % self.levels.len())
    }

    pub fn current_level(&self) -> Option<&AquariumLevel> {
        self.current_index().map(|i| &self.levels[i])
    }

    fn current_level_mut(&mut self) -> Option<&mut AquariumLevel> {
        self.current_index().map(|i| &mut self.levels[i])
    }

    /// Top up the active level, or advance past it once completed
    ///
    /// Advancing resets the finished level, moves to the next one (wrapping)
    /// and clears every live fish before the new level spawns. Power-ups stay.
    pub fn repopulate(&mut self) {
        let Some(mut index) = self.current_index() else {
            return;
        };

        if self.levels[index].is_completed() {
            let finished = &mut self.levels[index];
            log::info!(
                "Level {} completed with score {}/{}",
                finished.number(),
                finished.score(),
                finished.target_score()
            );
            finished.level_reset();
            self.current_level += 1;
            index = self.current_level % self.levels.len();
            self.clear_creatures();
            log::info!("Advancing to level {}", self.levels[index].number());
        }

        for kind in self.levels[index].repopulate() {
            self.spawn_creature(kind);
        }
    }

    // --- Simulation ---

    /// One world step: move everything, repopulate, then separate overlapping fish
    pub fn update(&mut self) {
        for creature in &mut self.creatures {
            creature.step();
        }
        for pickup in &mut self.power_ups {
            pickup.step();
        }

        self.repopulate();

        resolve_pairwise(&mut self.creatures);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for creature in &self.creatures {
            creature.draw(canvas);
        }
        for pickup in &self.power_ups {
            pickup.draw(canvas);
        }
    }
}
