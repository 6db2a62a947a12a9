//! UI actions sent from menus and screens to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. A command that
//! does not apply to the current game state is ignored.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All UI-level player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Menus ---
    /// Start an endless run (no level).
    StartEndless,
    /// Open the level picker.
    OpenLevelSelect,
    /// Start a campaign level (1-based). Ignored if the level is locked.
    StartLevel { number: u32 },
    /// From the level summary, start the following level.
    NextLevel,
    /// From the level summary, restart the same level.
    ReplayLevel,
    /// Return to the main menu.
    ReturnToMenu,

    // --- Shop ---
    OpenShop,
    Purchase { upgrade: UpgradeKind },
    /// Leave the shop, banking any session score.
    LeaveShop,

    // --- Simulation control ---
    Pause,
    Resume,
    /// Context-dependent back/pause key.
    Escape,
    /// Switch between keyboard and pointer steering.
    ToggleControlScheme,

    // --- Progress ---
    /// Wipe persisted progress back to defaults.
    ResetProgress,
    /// End the game.
    Quit,
}
