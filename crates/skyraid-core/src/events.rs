//! Events emitted by the simulation for audio feedback.
//!
//! Cues are fire-and-forget: the simulation never reads them back, so a missing
//! audio device cannot change an outcome.

use serde::{Deserialize, Serialize};

/// Audio cue for the frontend sound system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A gun, missile or bomb was fired.
    Shoot,
    /// A projectile hit without killing.
    Hit,
    /// Something was destroyed.
    Explosion,
}
