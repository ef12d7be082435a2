//! Per-frame scene update
//!
//! The player moves every frame. Collisions, scoring and the world step run
//! only on throttled frames, counted by `FrameThrottle`.

use std::sync::Arc;

use glam::Vec2;

use super::aquarium::Aquarium;
use super::collision::{detect_aquarium_collision, detect_power_up_collision};
use super::player::PlayerCreature;
use super::state::{Creature, GameEvent, ScenePhase};
use crate::audio::{AmbientSound, AudioBackend, SoundHandle, start_ambient};
use crate::consts::*;
use crate::renderer::{Canvas, HudSnapshot, SpriteKey, SpriteRegistry, paint_hud};
use crate::settings::Settings;

/// Fires once every `interval` frames (on the N-th, 2N-th, ... call)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameThrottle {
    interval: u32,
    counter: u32,
}

impl FrameThrottle {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            counter: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Count a frame; true when this frame should run the heavy step
    pub fn should_run_heavy_step(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.interval {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}

/// Orchestration knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTuning {
    pub throttle_frames: u32,
    pub damage_debounce_frames: u32,
    /// Heavy ticks between automatic power-up spawns (0 = never)
    pub power_up_interval: u32,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            throttle_frames: THROTTLE_FRAMES,
            damage_debounce_frames: DAMAGE_DEBOUNCE_FRAMES,
            power_up_interval: 0,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New heading for the player (renormalised)
    pub direction: Option<Vec2>,
    /// Idle/demo mode - autopilot steers the player
    pub idle_mode: bool,
}

/// Player vs. aquarium
pub struct AquariumGameScene {
    name: String,
    player: PlayerCreature,
    aquarium: Aquarium,
    throttle: FrameThrottle,
    tuning: SceneTuning,
    phase: ScenePhase,
    last_event: Option<GameEvent>,
    frame: u64,
    heavy_ticks: u64,
    ambient: Option<SoundHandle>,
}

impl AquariumGameScene {
    /// Assemble a scene and start the ambient track
    pub fn new(
        mut player: PlayerCreature,
        aquarium: Aquarium,
        name: impl Into<String>,
        tuning: SceneTuning,
        audio: &mut dyn AudioBackend,
        ambient: &AmbientSound,
    ) -> Self {
        player.set_bounds(
            aquarium.width() as f32 - SPRITE_MARGIN,
            aquarium.height() as f32 - SPRITE_MARGIN,
        );
        Self {
            name: name.into(),
            player,
            aquarium,
            throttle: FrameThrottle::new(tuning.throttle_frames),
            tuning,
            phase: ScenePhase::Playing,
            last_event: None,
            frame: 0,
            heavy_ticks: 0,
            ambient: start_ambient(audio, ambient),
        }
    }

    /// Build the stock scene: default artwork, configured levels, player centred
    pub fn from_settings(settings: &Settings, audio: &mut dyn AudioBackend) -> Self {
        let sprites = Arc::new(SpriteRegistry::with_defaults());
        let mut aquarium = Aquarium::new(
            settings.world_width,
            settings.world_height,
            Arc::clone(&sprites),
            settings.seed,
        );
        for level in settings.build_levels() {
            aquarium.add_level(level);
        }

        let center = Vec2::new(
            settings.world_width as f32 / 2.0,
            settings.world_height as f32 / 2.0,
        );
        let player = PlayerCreature::new(
            center,
            settings.player_start_speed,
            sprites.sprite(SpriteKey::Player),
            sprites.sprite(SpriteKey::PlayerFlash),
        )
        .with_tuning(settings.flash_frames, settings.power_up_score_step);

        Self::new(
            player,
            aquarium,
            "AquariumGameScene",
            settings.scene_tuning(),
            audio,
            &settings.ambient_sound,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> &PlayerCreature {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerCreature {
        &mut self.player
    }

    pub fn aquarium(&self) -> &Aquarium {
        &self.aquarium
    }

    pub fn aquarium_mut(&mut self) -> &mut Aquarium {
        &mut self.aquarium
    }

    /// Event produced by the most recent heavy step
    pub fn last_event(&self) -> Option<GameEvent> {
        self.last_event
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == ScenePhase::GameOver
    }

    /// Frames processed while playing
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn ambient_sound(&self) -> Option<SoundHandle> {
        self.ambient
    }

    /// Window resize: future spawns and the player use the new bounds
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        self.aquarium.set_bounds(width, height);
        self.player
            .set_bounds(width as f32 - SPRITE_MARGIN, height as f32 - SPRITE_MARGIN);
    }

    /// Advance one frame. Returns the event of this frame's heavy step, if any.
    pub fn update(&mut self, input: &TickInput) -> Option<GameEvent> {
        if self.phase == ScenePhase::GameOver {
            return None;
        }

        let direction = if input.idle_mode {
            autopilot_direction(&self.player, &self.aquarium).or(input.direction)
        } else {
            input.direction
        };
        if let Some(dir) = direction {
            self.player.set_direction(dir.x, dir.y);
        }

        self.frame += 1;
        self.player.update();

        if !self.throttle.should_run_heavy_step() {
            return None;
        }
        self.heavy_step()
    }

    fn heavy_step(&mut self) -> Option<GameEvent> {
        self.heavy_ticks += 1;
        self.last_event = None;

        // Player vs fish: first hit in list order only
        if let Some(event) = detect_aquarium_collision(&self.aquarium, &self.player) {
            self.last_event = Some(event);
            let target = event
                .creature_b
                .and_then(|id| self.aquarium.creature(id))
                .map(|npc| (npc.id, npc.value));

            if let Some((npc_id, value)) = target {
                if self.player.power() < value {
                    self.player.lose_life(self.tuning.damage_debounce_frames);
                    if self.player.lives() <= 0 {
                        let game_over = GameEvent::game_over(self.player.id());
                        self.phase = ScenePhase::GameOver;
                        self.last_event = Some(game_over);
                        log::info!(
                            "Game over after {} frames, final score {}",
                            self.frame,
                            self.player.score()
                        );
                        return self.last_event;
                    }
                } else {
                    self.aquarium.remove_creature(npc_id);
                    if self.player.add_to_score(1, value) {
                        log::info!("Power increased to {}", self.player.power());
                    }
                }
            }
        }

        // Player vs power-ups
        if let Some(pickup) = detect_power_up_collision(&self.aquarium, &self.player) {
            self.player.increase_power(1);
            self.player.start_flash();
            self.aquarium.remove_power_up(pickup);
            log::debug!("Picked up power-up {:?}, power {}", pickup, self.player.power());
        }

        if self.tuning.power_up_interval > 0
            && self.heavy_ticks % u64::from(self.tuning.power_up_interval) == 0
        {
            self.aquarium.spawn_random_power_up();
        }

        self.aquarium.update();
        self.last_event
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.player.draw(canvas);
        self.aquarium.draw(canvas);
        paint_hud(canvas, &HudSnapshot::from(&self.player));
    }
}

/// Radius around a threat inside which the autopilot flees
const FLEE_RADIUS: f32 = 120.0;

/// Demo steering: flee the nearest fish too strong to eat when it is close,
/// otherwise chase the nearest edible fish, otherwise the nearest power-up
pub fn autopilot_direction(player: &PlayerCreature, aquarium: &Aquarium) -> Option<Vec2> {
    let pos = player.pos();
    let power = player.power();
    let by_distance = |a: &&Creature, b: &&Creature| {
        a.body
            .pos
            .distance(pos)
            .partial_cmp(&b.body.pos.distance(pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    };

    let threat = aquarium
        .creatures()
        .iter()
        .filter(|c| c.value > power)
        .min_by(by_distance);
    if let Some(threat) = threat {
        if threat.body.pos.distance(pos) < FLEE_RADIUS + threat.body.radius {
            return Some((pos - threat.body.pos).normalize_or_zero());
        }
    }

    aquarium
        .creatures()
        .iter()
        .filter(|c| c.value <= power)
        .min_by(by_distance)
        .or_else(|| aquarium.power_ups().iter().min_by(by_distance))
        .map(|target| (target.body.pos - pos).normalize_or_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::renderer::TraceCanvas;
    use crate::sim::state::{EntityId, FishKind, GameEventKind, PowerUpKind};
    use crate::sim::AquariumLevel;

    fn scene() -> AquariumGameScene {
        let aquarium = Aquarium::new(800, 600, Arc::new(SpriteRegistry::empty()), 11);
        let player = PlayerCreature::new(Vec2::new(400.0, 300.0), 0.0, None, None);
        AquariumGameScene::new(
            player,
            aquarium,
            "test",
            SceneTuning::default(),
            &mut SilentAudio::default(),
            &AmbientSound::default(),
        )
    }

    /// Parked fish (no speed, no heading) with a given value
    fn parked_fish(pos: Vec2, value: i32) -> Creature {
        let mut fish = Creature::fish(FishKind::Common, pos, 0.0, Vec2::ZERO, None);
        fish.value = value;
        fish
    }

    fn run_frames(scene: &mut AquariumGameScene, frames: usize) -> Vec<GameEvent> {
        (0..frames)
            .filter_map(|_| scene.update(&TickInput::default()))
            .collect()
    }

    #[test]
    fn test_throttle_fires_every_fifth_frame() {
        let mut throttle = FrameThrottle::new(5);
        let frames: Vec<u32> = (1..=15)
            .filter(|_| throttle.should_run_heavy_step())
            .collect();
        assert_eq!(frames, [5, 10, 15]);
        assert_eq!(FrameThrottle::new(0).interval(), 1);
    }

    #[test]
    fn test_collisions_wait_for_throttle() {
        let mut scene = scene();
        scene.aquarium_mut().add_creature(parked_fish(Vec2::new(400.0, 300.0), 5));

        assert!(run_frames(&mut scene, 4).is_empty());
        assert_eq!(scene.player().lives(), 3);

        let event = scene.update(&TickInput::default());
        assert!(event.is_some_and(|e| e.is_collision_event()));
    }

    #[test]
    fn test_player_moves_every_frame() {
        let mut scene = scene();
        scene.player_mut().change_speed(2.0);
        let input = TickInput {
            direction: Some(Vec2::new(1.0, 0.0)),
            ..Default::default()
        };
        for _ in 0..3 {
            scene.update(&input);
        }
        assert_eq!(scene.player().pos(), Vec2::new(406.0, 300.0));
        assert_eq!(scene.frame(), 3);
    }

    #[test]
    fn test_stronger_fish_damages_player() {
        let mut scene = scene();
        let fish = scene
            .aquarium_mut()
            .add_creature(parked_fish(Vec2::new(400.0, 300.0), 5));

        let events = run_frames(&mut scene, 5);
        assert_eq!(events, [GameEvent::collision(EntityId::PLAYER, fish)]);
        assert_eq!(scene.player().lives(), 2);
        assert_eq!(scene.player().damage_debounce(), DAMAGE_DEBOUNCE_FRAMES);
        assert!(scene.player().is_flashing());
        assert_eq!(scene.phase(), ScenePhase::Playing);
        assert_eq!(scene.aquarium().creature_count(), 1);

        // Still overlapping next heavy step, but the debounce holds
        run_frames(&mut scene, 5);
        assert_eq!(scene.player().lives(), 2);
    }

    #[test]
    fn test_strong_player_eats_fish() {
        let mut scene = scene();
        scene.player_mut().increase_power(5);
        assert_eq!(scene.player().power(), 6);
        scene
            .aquarium_mut()
            .add_creature(parked_fish(Vec2::new(400.0, 300.0), 5));

        run_frames(&mut scene, 5);
        assert_eq!(scene.aquarium().creature_count(), 0);
        assert_eq!(scene.player().score(), 5);
        assert_eq!(scene.player().power(), 6);
        assert_eq!(scene.player().lives(), 3);
    }

    #[test]
    fn test_only_first_overlap_is_handled() {
        let mut scene = scene();
        let first = scene
            .aquarium_mut()
            .add_creature(parked_fish(Vec2::new(400.0, 300.0), 1));
        let second = scene
            .aquarium_mut()
            .add_creature(parked_fish(Vec2::new(405.0, 300.0), 1));

        run_frames(&mut scene, 5);
        assert!(scene.aquarium().creature(first).is_none());
        assert!(scene.aquarium().creature(second).is_some());
        assert_eq!(scene.player().score(), 1);
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let mut scene = scene();
        scene.player_mut().set_lives(1);
        scene
            .aquarium_mut()
            .add_creature(parked_fish(Vec2::new(400.0, 300.0), 5));
        scene.aquarium_mut().add_power_up(Creature::power_up(
            PowerUpKind::Power,
            Vec2::new(400.0, 300.0),
            None,
        ));

        let events = run_frames(&mut scene, 5);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, GameEventKind::GameOver);
        assert_eq!(scene.last_event(), Some(GameEvent::game_over(EntityId::PLAYER)));
        assert!(scene.is_game_over());
        assert_eq!(scene.player().lives(), 0);
        // Rest of the tick was skipped
        assert_eq!(scene.aquarium().power_ups().len(), 1);
        assert_eq!(scene.player().power(), 1);

        assert!(run_frames(&mut scene, 10).is_empty());
        assert_eq!(scene.frame(), 5);
    }

    #[test]
    fn test_power_up_pickup() {
        let mut scene = scene();
        scene.aquarium_mut().add_power_up(Creature::power_up(
            PowerUpKind::Speed,
            Vec2::new(410.0, 300.0),
            None,
        ));

        assert!(run_frames(&mut scene, 5).is_empty());
        assert_eq!(scene.player().power(), 2);
        assert!(scene.player().is_flashing());
        assert!(scene.aquarium().power_ups().is_empty());
    }

    #[test]
    fn test_heavy_step_updates_world() {
        let mut scene = scene();
        scene
            .aquarium_mut()
            .add_level(AquariumLevel::preset(0).expect("preset 0"));
        run_frames(&mut scene, 4);
        assert_eq!(scene.aquarium().creature_count(), 0);
        run_frames(&mut scene, 1);
        assert_eq!(scene.aquarium().creature_count(), 10);
    }

    #[test]
    fn test_power_ups_spawn_on_interval() {
        let mut scene = AquariumGameScene::new(
            PlayerCreature::new(Vec2::new(10.0, 10.0), 0.0, None, None),
            Aquarium::new(800, 600, Arc::new(SpriteRegistry::empty()), 2),
            "interval",
            SceneTuning {
                power_up_interval: 2,
                ..Default::default()
            },
            &mut SilentAudio::default(),
            &AmbientSound::default(),
        );
        run_frames(&mut scene, 5);
        assert!(scene.aquarium().power_ups().is_empty());
        run_frames(&mut scene, 5);
        assert_eq!(scene.aquarium().power_ups().len(), 1);
    }

    #[test]
    fn test_autopilot_chases_prey_and_flees_threats() {
        let mut scene = scene();
        scene
            .aquarium_mut()
            .add_creature(parked_fish(Vec2::new(600.0, 300.0), 1));
        let dir = autopilot_direction(scene.player(), scene.aquarium());
        assert_eq!(dir, Some(Vec2::X));

        scene
            .aquarium_mut()
            .add_creature(parked_fish(Vec2::new(400.0, 350.0), 5));
        let dir = autopilot_direction(scene.player(), scene.aquarium());
        assert_eq!(dir, Some(Vec2::NEG_Y));
    }

    #[test]
    fn test_settings_scene_is_deterministic() {
        let settings = Settings::default();
        let mut a = AquariumGameScene::from_settings(&settings, &mut SilentAudio::default());
        let mut b = AquariumGameScene::from_settings(&settings, &mut SilentAudio::default());
        assert!(a.ambient_sound().is_some());

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..300 {
            a.update(&input);
            b.update(&input);
        }
        assert_eq!(a.player().pos(), b.player().pos());
        assert_eq!(a.player().score(), b.player().score());
        assert_eq!(a.aquarium().creature_count(), b.aquarium().creature_count());
        assert!(a.aquarium().creature_count() > 0);
    }

    #[test]
    fn test_draw_covers_player_world_and_hud() {
        let settings = Settings::default();
        let mut scene = AquariumGameScene::from_settings(&settings, &mut SilentAudio::default());
        run_frames(&mut scene, 5);

        let mut canvas = TraceCanvas::new(settings.world_width as f32);
        scene.draw(&mut canvas);
        assert_eq!(
            canvas.sprite_calls,
            1 + scene.aquarium().creature_count() + scene.aquarium().power_ups().len()
        );
        assert_eq!(canvas.text_calls, 4);
        assert_eq!(canvas.pip_calls, 3);
    }

    #[test]
    fn test_resize_updates_player_bounds() {
        let mut scene = scene();
        scene.set_bounds(300, 200);
        assert_eq!(scene.player().body().bounds, Vec2::new(280.0, 180.0));
        assert_eq!(scene.aquarium().width(), 300);
    }
}
