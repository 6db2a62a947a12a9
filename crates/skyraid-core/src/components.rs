//! ECS components for hecs entities.
//!
//! Components are plain data. Movement and firing laws live in
//! `skyraid-enemy-ai` and the sim systems, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Rect;

/// Top-left corner of an entity's bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Displacement per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Fixed bounding-box size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Bounding rect for an entity at `position`.
    pub fn rect(&self, position: Vec2) -> Rect {
        Rect::at(position, self.size)
    }
}

/// Monotonic creation number. Collision passes iterate in this order so
/// first-match resolution is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnIndex(pub u64);

/// Hit points, always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Subtract `amount`, clamping at zero. Returns true if this depleted the pool.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.current > 0;
        self.current = (self.current - amount.max(0)).clamp(0, self.max);
        was_alive && self.current == 0
    }

    /// Force health to zero.
    pub fn deplete(&mut self) {
        self.current = 0;
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Current health over max, in [0, 1].
    pub fn fraction(&self) -> f32 {
        self.current.max(0) as f32 / self.max as f32
    }

    pub fn damage_state(&self) -> DamageState {
        DamageState::from_fraction(self.fraction())
    }
}

/// Shared enemy skeleton: variant, firing cooldown and the terminal dead flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Ticks until the next shot is allowed.
    pub fire_cooldown: i32,
    /// Set once when health reaches zero. Never cleared.
    pub dead: bool,
}

/// Variant-specific enemy state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    Drift {
        speed: f32,
    },
    Hold {
        speed: f32,
        stop_x: f32,
        stopped: bool,
    },
    Patrol {
        speed: f32,
        stop_x: f32,
        vertical_speed: f32,
        /// +1 moving down, -1 moving up.
        direction: f32,
        stopped: bool,
    },
    Launch {
        speed: f32,
        stop_x: f32,
    },
    Bank {
        base_speed: f32,
        current_speed: f32,
        /// Degrees; positive banks downward.
        angle: f32,
        target_angle: f32,
        retarget_timer: u32,
        retarget_delay: u32,
    },
    Flank {
        speed: f32,
    },
    Bomb {
        speed: f32,
        bomb_cooldown: i32,
    },
}

impl EnemyBehavior {
    /// Heading in degrees for rendering. Only bankers rotate.
    pub fn heading_degrees(&self) -> f32 {
        match self {
            EnemyBehavior::Bank { angle, .. } => *angle,
            _ => 0.0,
        }
    }
}

/// Motion law and per-law state of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileMotion {
    /// Constant velocity.
    Straight,
    /// Steers at the nearest living enemy every tick.
    PlayerHoming { speed: f32 },
    /// Chases the player with a heading refreshed every `retarget_interval` ticks.
    EnemyHoming {
        speed: f32,
        heading: Vec2,
        age: u32,
        lifespan: u32,
        retarget_timer: u32,
        retarget_interval: u32,
    },
    /// Falls at constant speed with a cosmetic spin.
    Ballistic { rotation: f32, spin: f32 },
}

/// A live projectile. Damage is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub motion: ProjectileMotion,
    pub side: Side,
    pub damage: i32,
}

impl Projectile {
    pub fn class(&self) -> ProjectileClass {
        match self.motion {
            ProjectileMotion::Straight => ProjectileClass::Bullet,
            ProjectileMotion::PlayerHoming { .. } => ProjectileClass::PlayerMissile,
            ProjectileMotion::EnemyHoming { .. } => ProjectileClass::EnemyMissile,
            ProjectileMotion::Ballistic { .. } => ProjectileClass::Bomb,
        }
    }

    /// True once an enemy missile has outlived its lifespan.
    pub fn is_expired(&self) -> bool {
        match self.motion {
            ProjectileMotion::EnemyHoming { age, lifespan, .. } => age > lifespan,
            _ => false,
        }
    }
}
