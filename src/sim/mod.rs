//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `Canvas` contract

pub mod aquarium;
pub mod collision;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use aquarium::Aquarium;
pub use collision::{
    check_collision, detect_aquarium_collision, detect_power_up_collision, resolve_overlap,
    resolve_pairwise,
};
pub use level::{AquariumLevel, PopulationNode};
pub use player::PlayerCreature;
pub use state::{
    Body, Creature, CreatureKind, EntityId, FishKind, FishProfile, GameEvent, GameEventKind,
    PowerUpKind, ScenePhase,
};
pub use tick::{AquariumGameScene, FrameThrottle, SceneTuning, TickInput, autopilot_direction};
