//! Per-tick input snapshot.
//!
//! The simulation never polls devices. The caller samples whatever devices it
//! has and hands one `InputFrame` to each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Sampled input for a single tick.
///
/// Held inputs (`left`, `right`, `up`, `down`, `fire`, `pointer_down`) are true
/// for every tick the control is held. Edge inputs (`missile`, `pause`,
/// `toggle_control`) must be true only on the tick the control went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    /// Ascend.
    pub up: bool,
    /// Dive.
    pub down: bool,
    pub fire: bool,
    pub missile: bool,
    pub pause: bool,
    pub toggle_control: bool,
    /// Pointer position in screen space, if a pointer is present.
    pub pointer: Option<Vec2>,
    /// Primary pointer button; fires like `fire`.
    pub pointer_down: bool,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame with only the fire control held.
    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    pub fn wants_fire(&self) -> bool {
        self.fire || self.pointer_down
    }
}
