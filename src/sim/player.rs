//! The player-controlled fish

use glam::Vec2;

use super::state::{Body, Creature, CreatureKind, EntityId};
use crate::consts::*;
use crate::renderer::{BlendMode, Canvas, Sprite};
use crate::unit_direction;

/// Player state on top of the shared creature record
#[derive(Debug, Clone)]
pub struct PlayerCreature {
    creature: Creature,
    score: i32,
    lives: i32,
    power: i32,
    /// Frames left during which hits are ignored
    damage_debounce: u32,
    /// Frames left of the white flash
    flash_frames: u32,
    flipped: bool,
    flash_sprite: Option<Sprite>,
    /// Length of the flash window started by `start_flash`
    flash_length: u32,
    /// Score multiple that grants a power increase
    power_up_score_step: i32,
}

impl PlayerCreature {
    pub fn new(pos: Vec2, speed: f32, sprite: Option<Sprite>, flash_sprite: Option<Sprite>) -> Self {
        Self {
            creature: Creature {
                id: EntityId::PLAYER,
                kind: CreatureKind::Player,
                body: Body::new(pos, speed, PLAYER_RADIUS),
                value: 1,
                sprite,
            },
            score: 0,
            lives: PLAYER_LIVES,
            power: PLAYER_POWER,
            damage_debounce: 0,
            flash_frames: 0,
            flipped: false,
            flash_sprite,
            flash_length: FLASH_FRAMES,
            power_up_score_step: POWER_UP_SCORE_STEP,
        }
    }

    /// Override the flash window and the score step that grants power
    pub fn with_tuning(mut self, flash_frames: u32, power_up_score_step: i32) -> Self {
        self.flash_length = flash_frames;
        self.power_up_score_step = power_up_score_step;
        self
    }

    pub fn id(&self) -> EntityId {
        self.creature.id
    }

    pub fn creature(&self) -> &Creature {
        &self.creature
    }

    pub fn body(&self) -> &Body {
        &self.creature.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.creature.body
    }

    pub fn pos(&self) -> Vec2 {
        self.creature.body.pos
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.creature.body.bounds = Vec2::new(width, height);
    }

    // --- Direction and movement ---

    /// Steer; the heading is renormalised and the facing follows dx
    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        let dir = unit_direction(dx, dy);
        self.creature.body.dir = dir;
        self.set_flipped(dir.x < 0.0);
    }

    pub fn direction(&self) -> Vec2 {
        self.creature.body.dir
    }

    pub fn is_x_direction_active(&self) -> bool {
        self.creature.body.dir.x != 0.0
    }

    pub fn is_y_direction_active(&self) -> bool {
        self.creature.body.dir.y != 0.0
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
        if let Some(sprite) = self.creature.sprite.as_mut() {
            sprite.set_flipped(flipped);
        }
        if let Some(sprite) = self.flash_sprite.as_mut() {
            sprite.set_flipped(flipped);
        }
    }

    pub fn speed(&self) -> f32 {
        self.creature.body.speed
    }

    pub fn change_speed(&mut self, speed: f32) {
        self.creature.body.speed = speed;
    }

    /// Move by heading * speed and bounce off the walls
    pub fn step(&mut self) {
        self.creature.step();
    }

    /// Per-frame update: debounce decay, movement, flash decay
    pub fn update(&mut self) {
        self.reduce_damage_debounce();
        self.step();
        self.flash_frames = self.flash_frames.saturating_sub(1);
    }

    // --- Gameplay ---

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: i32) {
        self.lives = lives.max(0);
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn damage_debounce(&self) -> u32 {
        self.damage_debounce
    }

    pub fn flash_frames(&self) -> u32 {
        self.flash_frames
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_frames > 0
    }

    /// Add `amount * weight` to the score. Returns true when the new score
    /// lands on a multiple of the power step and power was increased.
    /// Only one check is made per call, so jumping over a multiple awards nothing.
    pub fn add_to_score(&mut self, amount: i32, weight: i32) -> bool {
        let gained = amount * weight;
        self.score += gained;
        if gained > 0 && self.power_up_score_step > 0 && self.score % self.power_up_score_step == 0 {
            self.increase_power(1);
            return true;
        }
        false
    }

    /// Take a hit unless still inside the debounce window. Returns true if a
    /// life was actually lost.
    pub fn lose_life(&mut self, debounce: u32) -> bool {
        if self.damage_debounce > 0 {
            return false;
        }
        if self.lives > 0 {
            self.lives -= 1;
        }
        self.damage_debounce = debounce;
        log::info!("Player lost a life! Lives remaining: {}", self.lives);
        self.start_flash();
        true
    }

    /// Grow: more power, a larger collision radius and a faster swim
    pub fn increase_power(&mut self, value: i32) {
        self.power += value;
        self.creature.body.radius += POWER_RADIUS_GROWTH;
        self.creature.body.speed += POWER_SPEED_GROWTH;
    }

    pub fn reduce_damage_debounce(&mut self) {
        self.damage_debounce = self.damage_debounce.saturating_sub(1);
    }

    pub fn start_flash(&mut self) {
        self.flash_frames = self.flash_length;
    }

    /// Flash sprite (additive) while flashing, the regular sprite otherwise
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(sprite) = &self.creature.sprite else {
            return;
        };
        match &self.flash_sprite {
            Some(flash) if self.is_flashing() => {
                canvas.draw_sprite(flash, self.pos(), BlendMode::Additive);
            }
            _ => canvas.draw_sprite(sprite, self.pos(), BlendMode::Alpha),
        }
    }
}
