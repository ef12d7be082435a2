//! Aquarium entry point
//!
//! Headless runner: builds the stock scene from settings and lets the
//! autopilot play for a fixed number of frames.
//!
//! Usage: `aquarium [settings.json] [frames]`

use aquarium::Settings;
use aquarium::audio::SilentAudio;
use aquarium::renderer::TraceCanvas;
use aquarium::sim::{AquariumGameScene, GameEventKind, TickInput};

const DEFAULT_FRAMES: u64 = 3000;

fn main() {
    env_logger::init();
    log::info!("Aquarium (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(&path),
        None => Settings::default(),
    };
    let frames = match args.next().map(|arg| arg.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            log::warn!("Bad frame count ({}), running {}", err, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };

    let mut audio = SilentAudio::default();
    let mut scene = AquariumGameScene::from_settings(&settings, &mut audio);
    let mut canvas = TraceCanvas::new(settings.world_width as f32);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut collisions = 0u64;
    for _ in 0..frames {
        match scene.update(&input).map(|event| event.kind) {
            Some(GameEventKind::Collision) => collisions += 1,
            Some(GameEventKind::GameOver) => {
                log::info!("Game over at frame {}", scene.frame());
                break;
            }
            None => {}
        }

        canvas.reset();
        scene.draw(&mut canvas);
    }

    let player = scene.player();
    let level = scene
        .aquarium()
        .current_level()
        .map(|level| level.number().to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("\n{} after {} frames", scene.name(), scene.frame());
    println!("  phase:      {:?}", scene.phase());
    println!("  score:      {}", player.score());
    println!("  power:      {}", player.power());
    println!("  lives:      {}", player.lives());
    println!("  level:      {} ({} advanced)", level, scene.aquarium().levels_advanced());
    println!("  fish:       {}", scene.aquarium().creature_count());
    println!("  power-ups:  {}", scene.aquarium().power_ups().len());
    println!("  collisions: {}", collisions);
    println!("  draw calls: {} (last frame)", canvas.total_calls());
}
