//! Per-run score counters.
//!
//! Stored in `SimulationEngine`, NOT in the ECS world.

use skyraid_core::state::ScoreView;

/// Running counters for the current run. Reset whenever a run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub current_score: u32,
    pub planes_destroyed: u32,
    pub level_score: u32,
    pub level_planes_destroyed: u32,
    /// Score the last finished run banked, for the summary screens.
    pub final_score: u32,
    pub level_failed: bool,
}

impl Session {
    /// Credit one destroyed enemy worth `points`.
    pub fn record_kill(&mut self, points: u32) {
        self.current_score += points;
        self.level_score += points;
        self.planes_destroyed += 1;
        self.level_planes_destroyed += 1;
    }

    pub fn view(&self, high_score: u32, unspent_score: u32) -> ScoreView {
        ScoreView {
            current_score: self.current_score,
            planes_destroyed: self.planes_destroyed,
            level_score: self.level_score,
            level_planes_destroyed: self.level_planes_destroyed,
            final_score: self.final_score,
            high_score,
            unspent_score,
        }
    }
}
