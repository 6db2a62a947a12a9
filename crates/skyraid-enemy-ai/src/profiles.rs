//! Variant-specific spawn profiles.
//!
//! Consolidates per-variant health, spawn band, cooldown ranges and shot
//! damage so the movement and firing laws stay free of magic numbers.

use glam::Vec2;
use rand::Rng;

use skyraid_core::components::EnemyBehavior;
use skyraid_core::constants::*;
use skyraid_core::enums::EnemyKind;

/// Inclusive integer tick range a cooldown is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownRange {
    pub min: i32,
    pub max: i32,
}

impl CooldownRange {
    pub const fn between(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(ticks: i32) -> Self {
        Self {
            min: ticks,
            max: ticks,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Static parameters for an enemy variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub max_health: i32,
    /// Horizontal spawn coordinate (right edge, or off the left edge for flankers).
    pub spawn_x: f32,
    /// Inclusive integer band the spawn y is drawn from.
    pub spawn_y_min: i32,
    pub spawn_y_max: i32,
    /// Cooldown before the first shot.
    pub initial_cooldown: CooldownRange,
    /// Cooldown after each shot.
    pub reload: CooldownRange,
    /// Damage carried by this variant's shots.
    pub shot_damage: i32,
    /// Cruise speed in pixels per tick.
    pub speed: f32,
}

/// Get the profile for a given variant.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    let band_min = ENEMY_SPAWN_MARGIN;
    let band_max = SCREEN_HEIGHT as i32 - ENEMY_SPAWN_MARGIN;

    match kind {
        EnemyKind::Drifter => EnemyProfile {
            max_health: 10,
            spawn_x: SCREEN_WIDTH,
            spawn_y_min: band_min,
            spawn_y_max: band_max,
            initial_cooldown: CooldownRange::between(30, 90),
            reload: CooldownRange::between(30, 90),
            shot_damage: ENEMY_BULLET_DAMAGE,
            speed: ENEMY_CRUISE_SPEED,
        },
        EnemyKind::Sentry => EnemyProfile {
            max_health: 20,
            spawn_x: SCREEN_WIDTH,
            spawn_y_min: band_min,
            spawn_y_max: band_max,
            initial_cooldown: CooldownRange::between(30, 90),
            reload: CooldownRange::between(70, 120),
            shot_damage: 15,
            speed: ENEMY_CRUISE_SPEED,
        },
        EnemyKind::Patroller => EnemyProfile {
            max_health: 20,
            spawn_x: SCREEN_WIDTH,
            spawn_y_min: band_min,
            spawn_y_max: band_max,
            initial_cooldown: CooldownRange::between(60, 100),
            reload: CooldownRange::between(50, 100),
            shot_damage: ENEMY_BULLET_DAMAGE,
            speed: ENEMY_CRUISE_SPEED,
        },
        EnemyKind::Launcher => EnemyProfile {
            max_health: 20,
            spawn_x: SCREEN_WIDTH,
            spawn_y_min: band_min,
            spawn_y_max: band_max,
            initial_cooldown: CooldownRange::fixed(210),
            reload: CooldownRange::fixed(240),
            shot_damage: ENEMY_MISSILE_DAMAGE,
            speed: ENEMY_CRUISE_SPEED,
        },
        EnemyKind::Banker => EnemyProfile {
            max_health: 10,
            spawn_x: SCREEN_WIDTH,
            spawn_y_min: (SCREEN_HEIGHT * 0.2) as i32,
            spawn_y_max: (SCREEN_HEIGHT * 0.7) as i32,
            initial_cooldown: CooldownRange::between(30, 90),
            reload: CooldownRange::between(30, 90),
            shot_damage: 20,
            speed: 4.0,
        },
        EnemyKind::Flanker => EnemyProfile {
            max_health: 10,
            spawn_x: -ENEMY_OFFSCREEN_MARGIN,
            spawn_y_min: band_min,
            spawn_y_max: band_max,
            initial_cooldown: CooldownRange::between(60, 120),
            reload: CooldownRange::between(60, 120),
            shot_damage: ENEMY_BULLET_DAMAGE,
            speed: ENEMY_CRUISE_SPEED,
        },
        EnemyKind::Bomber => EnemyProfile {
            max_health: 20,
            spawn_x: SCREEN_WIDTH,
            spawn_y_min: band_min,
            spawn_y_max: (SCREEN_HEIGHT * 0.35) as i32,
            initial_cooldown: CooldownRange::between(30, 90),
            reload: CooldownRange::between(30, 60),
            shot_damage: BOMB_DAMAGE,
            speed: ENEMY_CRUISE_SPEED,
        },
    }
}

/// Everything needed to spawn a fresh enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnState {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub behavior: EnemyBehavior,
    pub fire_cooldown: i32,
    pub max_health: i32,
}

/// Roll the spawn position, initial cooldown and behavior state for `kind`.
///
/// All randomness comes from `rng`, so a seeded gameplay RNG reproduces the
/// same enemy.
pub fn initial_state<R: Rng + ?Sized>(kind: EnemyKind, rng: &mut R) -> SpawnState {
    let profile = get_profile(kind);
    let y = rng.gen_range(profile.spawn_y_min..=profile.spawn_y_max) as f32;
    let fire_cooldown = profile.initial_cooldown.sample(rng);
    let speed = profile.speed;

    let behavior = match kind {
        EnemyKind::Drifter => EnemyBehavior::Drift { speed },
        EnemyKind::Sentry => EnemyBehavior::Hold {
            speed,
            stop_x: SCREEN_WIDTH * 0.8,
            stopped: false,
        },
        EnemyKind::Patroller => EnemyBehavior::Patrol {
            speed,
            stop_x: SCREEN_WIDTH * 0.7,
            vertical_speed: 1.5,
            direction: 1.0,
            stopped: false,
        },
        EnemyKind::Launcher => EnemyBehavior::Launch {
            speed,
            stop_x: SCREEN_WIDTH * 0.9,
        },
        EnemyKind::Banker => {
            let retarget_delay = rng.gen_range(BANKER_FIRST_RETARGET_MIN..=BANKER_FIRST_RETARGET_MAX);
            EnemyBehavior::Bank {
                base_speed: speed,
                current_speed: speed,
                angle: 0.0,
                target_angle: crate::behavior::pick_bank_angle(y, rng),
                retarget_timer: 0,
                retarget_delay,
            }
        }
        EnemyKind::Flanker => EnemyBehavior::Flank { speed },
        EnemyKind::Bomber => EnemyBehavior::Bomb {
            speed,
            bomb_cooldown: profile.reload.sample(rng),
        },
    };

    SpawnState {
        kind,
        position: Vec2::new(profile.spawn_x, y),
        behavior,
        fire_cooldown,
        max_health: profile.max_health,
    }
}
