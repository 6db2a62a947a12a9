//! Types shared between the launcher and the game loop thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use skyraid_campaign::Progress;
use skyraid_core::commands::PlayerCommand;
use skyraid_core::enums::GameState;
use skyraid_core::state::{GameStateSnapshot, ScoreView};
use skyraid_sim::SimConfig;

/// Commands sent from the launcher to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A UI command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop thread after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Everything the loop thread needs to run.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub sim: SimConfig,
    /// Progress loaded at startup; the engine takes ownership of it.
    pub progress: Progress,
    /// Where pending saves are written. `None` keeps progress in memory.
    pub save_path: Option<PathBuf>,
    /// Stop after this many ticks.
    pub max_ticks: u64,
    /// Pace ticks at 60 Hz instead of running flat out.
    pub realtime: bool,
    /// Steer with the pointer scheme.
    pub pointer: bool,
    /// Log a progress line every this many ticks (0 disables).
    pub report_every: u64,
    /// Commands queued before the first tick, e.g. to start a run.
    pub startup_commands: Vec<PlayerCommand>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            progress: Progress::default(),
            save_path: None,
            max_ticks: 3_600,
            realtime: false,
            pointer: false,
            report_every: 600,
            startup_commands: Vec::new(),
        }
    }
}

/// How the loop ended.
#[derive(Debug, Clone)]
pub struct LoopSummary {
    pub ticks: u64,
    pub final_state: GameState,
    pub score: ScoreView,
    pub saves_written: u32,
}
