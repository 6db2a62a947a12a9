//! Fundamental geometric and simulation types.
//!
//! Screen space: x grows to the right, y grows downward, origin top-left.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE};

/// Axis-aligned bounding box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size with its top-left corner at `origin`.
    pub fn at(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test. Rects that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True when the rect lies entirely outside the screen expanded by `margin`.
    pub fn is_outside_screen(&self, margin: f32) -> bool {
        self.right() < -margin
            || self.left() > SCREEN_WIDTH + margin
            || self.bottom() < -margin
            || self.top() > SCREEN_HEIGHT + margin
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of playing ticks since the current run started.
    pub tick: u64,
}

impl SimTime {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 * self.dt()
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// Euclidean distance floored at `min`, safe to divide by.
pub fn floored_distance(delta: Vec2, min: f32) -> f32 {
    delta.length().max(min)
}
