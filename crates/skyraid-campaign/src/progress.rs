use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use skyraid_core::constants::*;

/// Purchased upgrades and their next prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upgrades {
    pub max_health: i32,
    /// Ticks between player shots.
    pub shoot_delay: i32,
    pub health_upgrade_cost: u32,
    pub firerate_upgrade_cost: u32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            max_health: PLAYER_DEFAULT_MAX_HEALTH,
            shoot_delay: PLAYER_DEFAULT_SHOOT_DELAY,
            health_upgrade_cost: DEFAULT_HEALTH_UPGRADE_COST,
            firerate_upgrade_cost: DEFAULT_FIRERATE_UPGRADE_COST,
        }
    }
}

/// Everything that survives between runs.
///
/// Every field falls back to its default when missing from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub player_name: String,
    pub high_score: u32,
    #[serde(rename = "total_planes_destroyed")]
    pub total_kills: u32,
    pub unspent_score: u32,
    pub upgrades: Upgrades,
    /// Highest unlocked level number (1-based). Level 1 is always open.
    pub levels_unlocked: u32,
    pub levels_completed: BTreeSet<u32>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            player_name: "Player1".to_string(),
            high_score: 0,
            total_kills: 0,
            unspent_score: 0,
            upgrades: Upgrades::default(),
            levels_unlocked: 1,
            levels_completed: BTreeSet::new(),
        }
    }
}

impl Progress {
    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.levels_unlocked.max(1)
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.levels_completed.contains(&level)
    }

    /// Mark `level` completed and unlock the one after it, if it exists.
    pub fn record_completion(&mut self, level: u32, level_count: u32) {
        self.levels_completed.insert(level);
        let next = level + 1;
        if next <= level_count {
            self.levels_unlocked = self.levels_unlocked.max(next);
        }
    }

    /// Fold a finished run's score and kills into the persistent totals.
    pub fn bank_session(&mut self, session_score: u32, planes_destroyed: u32) {
        self.high_score = self.high_score.max(session_score);
        self.unspent_score = self.unspent_score.saturating_add(session_score);
        self.total_kills = self.total_kills.saturating_add(planes_destroyed);
    }
}
