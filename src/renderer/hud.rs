//! Informational overlay: score, power, lives

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Canvas;
use crate::sim::PlayerCreature;

/// Distance of the HUD panel from the right edge
const PANEL_OFFSET: f32 = 150.0;
const LINE_SCORE_Y: f32 = 20.0;
const LINE_POWER_Y: f32 = 30.0;
const LINE_LIVES_Y: f32 = 40.0;
const PIP_Y: f32 = 50.0;
const PIP_SPACING: f32 = 20.0;
const PIP_RADIUS: f32 = 5.0;

/// Values the overlay needs; read-only view of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: i32,
    pub power: i32,
    pub lives: i32,
}

impl From<&PlayerCreature> for HudSnapshot {
    fn from(player: &PlayerCreature) -> Self {
        Self {
            score: player.score(),
            power: player.power(),
            lives: player.lives(),
        }
    }
}

/// Paint the overlay anchored to the right edge of the canvas
pub fn paint_hud(canvas: &mut dyn Canvas, hud: &HudSnapshot) {
    let panel_x = canvas.width() - PANEL_OFFSET;
    canvas.draw_text(&format!("Score: {}", hud.score), Vec2::new(panel_x, LINE_SCORE_Y), false);
    canvas.draw_text(&format!("Power: {}", hud.power), Vec2::new(panel_x, LINE_POWER_Y), false);
    canvas.draw_text(&format!("Lives: {}", hud.lives), Vec2::new(panel_x, LINE_LIVES_Y), false);

    for i in 0..hud.lives.max(0) {
        canvas.draw_pip(Vec2::new(panel_x + i as f32 * PIP_SPACING, PIP_Y), PIP_RADIUS);
    }

    canvas.draw_text(&format!("Power: {}", hud.power), Vec2::new(20.0, 60.0), true);
}
