//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::SimTime;

/// Complete read-only view of the simulation after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: GameState,
    pub control_scheme: ControlScheme,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub particles: Vec<ParticleView>,
    pub score: ScoreView,
    /// Present while a campaign level is active.
    pub level: Option<LevelView>,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub health_fraction: f32,
    pub damage_state: DamageState,
    pub missiles: u32,
    pub max_missiles: u32,
    pub invulnerable: bool,
    /// Remaining hit-flash ticks, for blinking.
    pub hit_flash: u32,
    pub dead: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub size: Vec2,
    /// Heading in degrees (banking variants only).
    pub angle: f32,
    pub health_fraction: f32,
    pub damage_state: DamageState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub class: ProjectileClass,
    pub side: Side,
    pub position: Vec2,
    pub size: Vec2,
    /// Draw rotation in degrees, derived from velocity (bombs: spin).
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub size: f32,
    pub color: [u8; 3],
    pub life: u32,
}

/// Running session score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub current_score: u32,
    pub planes_destroyed: u32,
    pub level_score: u32,
    pub level_planes_destroyed: u32,
    /// Score of the last finished run, kept after it is banked.
    pub final_score: u32,
    pub high_score: u32,
    pub unspent_score: u32,
}

/// Campaign level progress for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelView {
    pub number: u32,
    pub tick: u32,
    pub current_wave: usize,
    pub wave_count: usize,
    pub all_waves_spawned: bool,
    pub completed: bool,
    pub failed: bool,
}
