//! Entity model and simulation events
//!
//! Every simulated thing shares one `Body` record. What differs between a
//! player, a fish and a power-up is carried by `CreatureKind` and the static
//! `FishProfile` table, so movement stays data-driven.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::AquariumError;
use crate::renderer::{BlendMode, Canvas, Sprite};

/// Stable handle for a live entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player is never stored in the world; it always has this id
    pub const PLAYER: EntityId = EntityId(0);
}

/// NPC fish species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishKind {
    #[serde(rename = "NPCreature")]
    Common,
    #[serde(rename = "BiggerFish")]
    Bigger,
    #[serde(rename = "FastFish")]
    Fast,
    #[serde(rename = "ArmoredFish")]
    Armored,
}

/// Per-species tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishProfile {
    pub radius: f32,
    pub value: i32,
    /// Multiplier applied to the spawn speed
    pub speed_scale: f32,
    /// Floor for the effective speed
    pub min_speed: f32,
    /// Round the scaled speed down to a whole number
    pub whole_speed: bool,
}

const COMMON_PROFILE: FishProfile = FishProfile {
    radius: 30.0,
    value: 1,
    speed_scale: 1.0,
    min_speed: 0.0,
    whole_speed: false,
};

const BIGGER_PROFILE: FishProfile = FishProfile {
    radius: 60.0,
    value: 5,
    speed_scale: 0.5,
    min_speed: 0.0,
    whole_speed: false,
};

const FAST_PROFILE: FishProfile = FishProfile {
    radius: 30.0,
    value: 1,
    speed_scale: 2.0,
    min_speed: 1.0,
    whole_speed: false,
};

const ARMORED_PROFILE: FishProfile = FishProfile {
    radius: 40.0,
    value: 1,
    speed_scale: 0.5,
    min_speed: 1.0,
    whole_speed: true,
};

impl FishProfile {
    /// Distance covered per move for a fish spawned with `base` speed
    pub fn effective_speed(&self, base: f32) -> f32 {
        let scaled = base * self.speed_scale;
        let scaled = if self.whole_speed { scaled.floor() } else { scaled };
        scaled.max(self.min_speed)
    }
}

impl FishKind {
    pub const ALL: [FishKind; 4] = [
        FishKind::Common,
        FishKind::Bigger,
        FishKind::Fast,
        FishKind::Armored,
    ];

    pub fn profile(self) -> &'static FishProfile {
        match self {
            FishKind::Common => &COMMON_PROFILE,
            FishKind::Bigger => &BIGGER_PROFILE,
            FishKind::Fast => &FAST_PROFILE,
            FishKind::Armored => &ARMORED_PROFILE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FishKind::Common => "NPCreature",
            FishKind::Bigger => "BiggerFish",
            FishKind::Fast => "FastFish",
            FishKind::Armored => "ArmoredFish",
        }
    }
}

impl fmt::Display for FishKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FishKind {
    type Err = AquariumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FishKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AquariumError::UnknownCreatureKind(s.to_string()))
    }
}

/// Power-up types. Only the kind is stored; every pickup grants power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Power,
    Size,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Speed, PowerUpKind::Power, PowerUpKind::Size];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "SPEED",
            PowerUpKind::Power => "POWER",
            PowerUpKind::Size => "SIZE",
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerUpKind {
    type Err = AquariumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PowerUpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AquariumError::UnknownPowerUpKind(s.to_string()))
    }
}

/// Closed set of creature variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    Player,
    Npc(FishKind),
    PowerUp(PowerUpKind),
}

/// Shared kinematic record: position, heading, speed, collision radius and
/// the bounds snapshot used by `bounce`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Heading; unit length for fish and the player, not enforced here
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub bounds: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            pos,
            dir: Vec2::ZERO,
            speed,
            radius,
            bounds: Vec2::ZERO,
        }
    }

    /// Move along the heading by `distance` per unit of direction
    #[inline]
    pub fn advance(&mut self, distance: f32) {
        self.pos += self.dir * distance;
    }

    /// Reflect off the walls of [0, bounds.x] x [0, bounds.y], each axis on its own
    pub fn bounce(&mut self) {
        reflect_axis(&mut self.pos.x, &mut self.dir.x, self.bounds.x);
        reflect_axis(&mut self.pos.y, &mut self.dir.y, self.bounds.y);
    }

    #[inline]
    pub fn distance_to(&self, other: &Body) -> f32 {
        self.pos.distance(other.pos)
    }
}

fn reflect_axis(pos: &mut f32, dir: &mut f32, bound: f32) {
    if *pos < 0.0 {
        *pos = 0.0;
        *dir = -*dir;
    } else if *pos > bound {
        *pos = bound;
        *dir = -*dir;
    }
}

/// A live fish or power-up owned by the world (the player wraps one too)
#[derive(Debug, Clone)]
pub struct Creature {
    pub id: EntityId,
    pub kind: CreatureKind,
    pub body: Body,
    /// Score weight; also the power needed to eat this creature
    pub value: i32,
    pub sprite: Option<Sprite>,
}

impl Creature {
    /// Build a fish with its species radius and value. `speed` is the raw spawn
    /// speed; the species multiplier is applied when moving.
    pub fn fish(kind: FishKind, pos: Vec2, speed: f32, dir: Vec2, sprite: Option<Sprite>) -> Self {
        let profile = kind.profile();
        let mut body = Body::new(pos, speed, profile.radius);
        body.dir = dir;
        Self {
            id: EntityId(0),
            kind: CreatureKind::Npc(kind),
            body,
            value: profile.value,
            sprite,
        }
    }

    /// Build a power-up: no swim speed, fixed downward drift
    pub fn power_up(kind: PowerUpKind, pos: Vec2, sprite: Option<Sprite>) -> Self {
        Self {
            id: EntityId(0),
            kind: CreatureKind::PowerUp(kind),
            body: Body::new(pos, 0.0, POWER_UP_RADIUS),
            value: 0,
            sprite,
        }
    }

    pub fn fish_kind(&self) -> Option<FishKind> {
        match self.kind {
            CreatureKind::Npc(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn power_up_kind(&self) -> Option<PowerUpKind> {
        match self.kind {
            CreatureKind::PowerUp(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_npc(&self) -> bool {
        matches!(self.kind, CreatureKind::Npc(_))
    }

    /// Distance covered per move
    pub fn effective_speed(&self) -> f32 {
        match self.kind {
            CreatureKind::Npc(kind) => kind.profile().effective_speed(self.body.speed),
            CreatureKind::PowerUp(_) => POWER_UP_DRIFT,
            CreatureKind::Player => self.body.speed,
        }
    }

    /// Raw heading update, no renormalisation
    pub fn set_direction(&mut self, dx: f32, dy: f32) {
        self.body.dir = Vec2::new(dx, dy);
    }

    /// Advance one simulation step
    pub fn step(&mut self) {
        match self.kind {
            CreatureKind::PowerUp(_) => {
                self.body.pos.y += POWER_UP_DRIFT;
                if self.body.pos.y > self.body.bounds.y {
                    self.body.pos.y = 0.0;
                }
            }
            CreatureKind::Npc(_) => {
                let speed = self.effective_speed();
                self.body.advance(speed);
                // Face the way we swim
                if let Some(sprite) = self.sprite.as_mut() {
                    sprite.set_flipped(self.body.dir.x < 0.0);
                }
                self.body.bounce();
            }
            CreatureKind::Player => {
                let speed = self.effective_speed();
                self.body.advance(speed);
                self.body.bounce();
            }
        }
    }

    /// Issue a draw call; creatures without a sprite are skipped
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(sprite) = &self.sprite {
            canvas.draw_sprite(sprite, self.body.pos, BlendMode::Alpha);
        }
    }
}

/// Scene lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    /// Ticks advance the simulation
    Playing,
    /// Player ran out of lives; ticks are ignored
    GameOver,
}

/// Kinds of externally visible occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    Collision,
    GameOver,
}

/// One externally relevant occurrence in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: GameEventKind,
    pub creature_a: EntityId,
    pub creature_b: Option<EntityId>,
}

impl GameEvent {
    pub fn collision(a: EntityId, b: EntityId) -> Self {
        Self {
            kind: GameEventKind::Collision,
            creature_a: a,
            creature_b: Some(b),
        }
    }

    pub fn game_over(a: EntityId) -> Self {
        Self {
            kind: GameEventKind::GameOver,
            creature_a: a,
            creature_b: None,
        }
    }

    pub fn is_collision_event(&self) -> bool {
        self.kind == GameEventKind::Collision
    }

    pub fn is_game_over(&self) -> bool {
        self.kind == GameEventKind::GameOver
    }
}
