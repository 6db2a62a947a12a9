//! Scripted pilot that turns the previous snapshot into the next input frame.
//!
//! Stands in for a keyboard or mouse when the runner is headless. It holds
//! station near the left edge, lines up with the closest enemy ahead and keeps
//! the trigger down.

use glam::Vec2;

use skyraid_core::constants::*;
use skyraid_core::enums::{ControlScheme, GameState};
use skyraid_core::input::InputFrame;
use skyraid_core::state::GameStateSnapshot;

/// Horizontal station the pilot tries to hold.
const STATION_X: f32 = 150.0;
/// Altitude band the pilot never leaves, so it cannot touch the ground.
const MIN_ALTITUDE: f32 = 40.0;
const MAX_ALTITUDE: f32 = SCREEN_HEIGHT - 120.0;
/// Ticks between missile launches.
const MISSILE_INTERVAL: u64 = 240;

#[derive(Debug, Clone)]
pub struct Autopilot {
    scheme: ControlScheme,
    ticks: u64,
}

impl Autopilot {
    pub fn new(scheme: ControlScheme) -> Self {
        Self { scheme, ticks: 0 }
    }

    /// Input for the next tick, given the last snapshot the loop produced.
    pub fn next_input(&mut self, snapshot: Option<&GameStateSnapshot>) -> InputFrame {
        let Some(snapshot) = snapshot else {
            return InputFrame::new();
        };
        if snapshot.state != GameState::Playing || snapshot.player.dead {
            return InputFrame::new();
        }
        self.ticks += 1;

        let player = &snapshot.player;
        let center = player.position + player.size / 2.0;
        let target_y = Self::target_altitude(snapshot, center);
        let missile = self.ticks % MISSILE_INTERVAL == 0
            && player.missiles > 0
            && !snapshot.enemies.is_empty();

        match self.scheme {
            ControlScheme::Pointer => InputFrame {
                pointer: Some(Vec2::new(STATION_X, target_y)),
                pointer_down: true,
                missile,
                ..InputFrame::default()
            },
            ControlScheme::Keyboard => InputFrame {
                left: center.x > STATION_X + 30.0,
                right: center.x < STATION_X - 30.0,
                up: center.y > target_y || player.velocity.y > 2.0,
                down: center.y < target_y - 40.0,
                fire: true,
                missile,
                ..InputFrame::default()
            },
        }
    }

    /// Centre altitude of the nearest enemy still ahead, clamped to the safe band.
    fn target_altitude(snapshot: &GameStateSnapshot, center: Vec2) -> f32 {
        let ahead = snapshot
            .enemies
            .iter()
            .filter(|enemy| enemy.position.x > center.x)
            .min_by(|a, b| a.position.x.total_cmp(&b.position.x));

        let wanted = match ahead {
            Some(enemy) => enemy.position.y + enemy.size.y / 2.0,
            None => SCREEN_HEIGHT / 2.0,
        };
        wanted.clamp(MIN_ALTITUDE, MAX_ALTITUDE)
    }
}
