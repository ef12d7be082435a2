//! Game settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! stock tuning.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AmbientSound;
use crate::consts::*;
use crate::error::AquariumError;
use crate::sim::{AquariumLevel, FishKind, SceneTuning};

/// One quota entry of a configured level; `kind` is a fish name such as "BiggerFish"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub kind: String,
    pub population: u32,
}

/// A configured level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub target_score: i32,
    pub population: Vec<NodeSpec>,
}

impl LevelSpec {
    /// Build the level; nodes naming an unknown kind are logged and skipped
    pub fn build(&self, number: u32) -> AquariumLevel {
        let mut level = AquariumLevel::new(number, self.target_score);
        for node in &self.population {
            match node.kind.parse::<FishKind>() {
                Ok(kind) => level = level.with_node(kind, node.population),
                Err(err) => log::error!("Level {}: {}, node skipped", number, err),
            }
        }
        level
    }
}

impl From<&AquariumLevel> for LevelSpec {
    fn from(level: &AquariumLevel) -> Self {
        Self {
            target_score: level.target_score(),
            population: level
                .population()
                .iter()
                .map(|node| NodeSpec {
                    kind: node.kind.to_string(),
                    population: node.population,
                })
                .collect(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: u32,
    pub world_height: u32,
    /// Seed for spawn positions, speeds and headings
    pub seed: u64,

    // === Scene pacing ===
    /// Heavy step (collisions, scoring, world update) every N frames
    pub throttle_frames: u32,
    pub damage_debounce_frames: u32,
    pub flash_frames: u32,
    /// Landing on a multiple of this score grants +1 power
    pub power_up_score_step: i32,
    pub player_start_speed: f32,
    /// Heavy ticks between automatic power-up spawns (0 = never)
    pub power_up_interval: u32,

    // === Audio ===
    pub ambient_sound: AmbientSound,

    // === Levels ===
    pub levels: Vec<LevelSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            seed: 42,

            throttle_frames: THROTTLE_FRAMES,
            damage_debounce_frames: DAMAGE_DEBOUNCE_FRAMES,
            flash_frames: FLASH_FRAMES,
            power_up_score_step: POWER_UP_SCORE_STEP,
            player_start_speed: PLAYER_START_SPEED,
            power_up_interval: 120,

            ambient_sound: AmbientSound::default(),

            levels: AquariumLevel::presets().iter().map(LevelSpec::from).collect(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, AquariumError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AquariumError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, AquariumError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Levels in configured order, numbered from 0
    pub fn build_levels(&self) -> Vec<AquariumLevel> {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.build(i as u32))
            .collect()
    }

    /// Orchestration knobs for the scene
    pub fn scene_tuning(&self) -> SceneTuning {
        SceneTuning {
            throttle_frames: self.throttle_frames,
            damage_debounce_frames: self.damage_debounce_frames,
            power_up_interval: self.power_up_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_presets() {
        let settings = Settings::default();
        assert_eq!(settings.build_levels(), AquariumLevel::presets());
        assert_eq!(settings.throttle_frames, 5);
        assert_eq!(settings.damage_debounce_frames, 180);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "world_width": 640, "seed": 9 }"#)
            .expect("valid settings");
        assert_eq!(settings.world_width, 640);
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.world_height, WORLD_HEIGHT);
        assert_eq!(settings.levels.len(), 5);
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let settings = Settings::from_json(
            r#"{ "levels": [ { "target_score": 4, "population": [
                { "kind": "Shark", "population": 3 },
                { "kind": "FastFish", "population": 2 }
            ] } ] }"#,
        )
        .expect("valid settings");
        let levels = settings.build_levels();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].population().len(), 1);
        assert_eq!(levels[0].population()[0].kind, FishKind::Fast);
    }

    #[test]
    fn test_json_round_trip_and_bad_input() {
        let settings = Settings::default();
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("parses back"), settings);
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(AquariumError::Settings(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert!(matches!(
            Settings::load("/nonexistent/aquarium.json"),
            Err(AquariumError::Io(_))
        ));
        assert_eq!(
            Settings::load_or_default("/nonexistent/aquarium.json"),
            Settings::default()
        );
    }
}
