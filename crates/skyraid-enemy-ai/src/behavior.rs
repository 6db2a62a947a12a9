//! Per-variant movement laws and firing policies.
//!
//! Pure functions over an enemy's plain data. The sim calls `advance` once
//! per tick for every live enemy, then `should_fire` and, if it returns
//! true, `fire`, turning the returned [`Shot`] into a projectile entity.

use glam::Vec2;
use rand::Rng;

use skyraid_core::components::{Enemy, EnemyBehavior};
use skyraid_core::constants::*;
use skyraid_core::enums::EnemyKind;

use crate::profiles::get_profile;

/// What an enemy sees of the world when deciding whether to fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireContext {
    /// Player top-left corner.
    pub player_position: Vec2,
}

/// Kind of projectile produced by a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotKind {
    Bullet,
    HomingMissile,
    Bomb,
}

/// A projectile request produced by [`fire`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub kind: ShotKind,
    /// Top-left corner of the new projectile.
    pub origin: Vec2,
    /// Initial velocity. Homing missiles derive their own heading on the first tick.
    pub velocity: Vec2,
    pub damage: i32,
}

/// Draw a new bank target in degrees for a banker at height `y`.
///
/// High bankers only bank downward, low bankers only upward.
pub fn pick_bank_angle<R: Rng + ?Sized>(y: f32, rng: &mut R) -> f32 {
    let angle = if y < SCREEN_HEIGHT * 0.3 {
        rng.gen_range(0..=BANKER_MAX_ANGLE)
    } else if y > SCREEN_HEIGHT * 0.7 {
        rng.gen_range(-BANKER_MAX_ANGLE..=0)
    } else {
        rng.gen_range(-BANKER_MAX_ANGLE..=BANKER_MAX_ANGLE)
    };
    angle as f32
}

/// Advance one enemy by one tick: cooldowns, variant state and position.
/// Returns the displacement applied this tick.
pub fn advance<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    behavior: &mut EnemyBehavior,
    position: &mut Vec2,
    rng: &mut R,
) -> Vec2 {
    if enemy.fire_cooldown > 0 {
        enemy.fire_cooldown -= 1;
    }

    let start = *position;

    match behavior {
        EnemyBehavior::Drift { speed } => {
            position.x -= *speed;
        }
        EnemyBehavior::Hold {
            speed,
            stop_x,
            stopped,
        } => {
            if !*stopped {
                position.x -= *speed;
                if position.x <= *stop_x {
                    *stopped = true;
                }
            }
        }
        EnemyBehavior::Patrol {
            speed,
            stop_x,
            vertical_speed,
            direction,
            stopped,
        } => {
            if !*stopped {
                position.x -= *speed;
                if position.x <= *stop_x {
                    *stopped = true;
                }
            } else {
                position.y += *vertical_speed * *direction;
                if position.y <= 0.0 || position.y >= SCREEN_HEIGHT - ENEMY_HEIGHT {
                    *direction = -*direction;
                }
            }
        }
        EnemyBehavior::Launch { speed, stop_x } => {
            if position.x > *stop_x {
                position.x -= *speed;
            }
        }
        EnemyBehavior::Bank {
            base_speed,
            current_speed,
            angle,
            target_angle,
            retarget_timer,
            retarget_delay,
        } => {
            *retarget_timer += 1;
            if *retarget_timer >= *retarget_delay {
                *target_angle = pick_bank_angle(position.y, rng);
                *retarget_timer = 0;
                *retarget_delay = rng.gen_range(BANKER_RETARGET_MIN..=BANKER_RETARGET_MAX);
            }

            let gap = *target_angle - *angle;
            if gap.abs() > BANKER_TURN_THRESHOLD {
                *angle += gap * BANKER_TURN_RATE;
                *current_speed = *base_speed * BANKER_TURN_SPEED_FACTOR;
            } else {
                *current_speed = *base_speed;
            }

            let rad = angle.to_radians();
            position.x -= *current_speed * rad.cos();
            position.y += *current_speed * rad.sin();

            let ceiling = SCREEN_HEIGHT * 0.2;
            let floor = SCREEN_HEIGHT * 0.8;
            if position.y < ceiling || position.y > floor {
                position.y = position.y.clamp(ceiling, floor);
                *target_angle = pick_bank_angle(position.y, rng);
                *retarget_timer = 0;
            }
        }
        EnemyBehavior::Flank { speed } => {
            position.x += *speed;
        }
        EnemyBehavior::Bomb {
            speed,
            bomb_cooldown,
        } => {
            position.x -= *speed;
            if *bomb_cooldown > 0 {
                *bomb_cooldown -= 1;
            }
        }
    }

    *position - start
}

/// Whether the enemy fires this tick.
pub fn should_fire(
    enemy: &Enemy,
    behavior: &EnemyBehavior,
    position: Vec2,
    ctx: &FireContext,
) -> bool {
    if enemy.dead {
        return false;
    }
    match behavior {
        EnemyBehavior::Launch { stop_x, .. } => {
            enemy.fire_cooldown <= 0
                && position.x <= *stop_x
                && (ctx.player_position.y - position.y).abs() < SCREEN_HEIGHT / 2.0
        }
        EnemyBehavior::Bomb { bomb_cooldown, .. } => {
            *bomb_cooldown <= 0
                && position.x > BOMBER_DROP_MARGIN
                && position.x < SCREEN_WIDTH - BOMBER_DROP_MARGIN
        }
        _ => enemy.fire_cooldown <= 0,
    }
}

/// Produce this enemy's shot and reset the relevant cooldown.
///
/// Call only after [`should_fire`] returned true.
pub fn fire<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    behavior: &mut EnemyBehavior,
    position: Vec2,
    rng: &mut R,
) -> Shot {
    let profile = get_profile(enemy.kind);
    let gun = position + Vec2::new(0.0, ENEMY_GUN_OFFSET_Y);
    let straight = Vec2::new(-ENEMY_BULLET_SPEED, 0.0);

    if let EnemyBehavior::Bomb { bomb_cooldown, .. } = behavior {
        *bomb_cooldown = profile.reload.sample(rng);
        return Shot {
            kind: ShotKind::Bomb,
            origin: position + Vec2::new(ENEMY_WIDTH / 2.0, ENEMY_HEIGHT),
            velocity: Vec2::new(BOMB_DRIFT_X, BOMB_FALL_SPEED),
            damage: profile.shot_damage,
        };
    }

    enemy.fire_cooldown = profile.reload.sample(rng);

    match enemy.kind {
        EnemyKind::Launcher => Shot {
            kind: ShotKind::HomingMissile,
            origin: gun,
            velocity: Vec2::NEG_X * ENEMY_MISSILE_SPEED,
            damage: profile.shot_damage,
        },
        EnemyKind::Banker => {
            let rad = behavior.heading_degrees().to_radians();
            Shot {
                kind: ShotKind::Bullet,
                origin: gun,
                velocity: Vec2::new(-rad.cos(), rad.sin()) * BANKER_SHOT_SPEED,
                damage: profile.shot_damage,
            }
        }
        EnemyKind::Flanker => Shot {
            kind: ShotKind::Bullet,
            origin: position + Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT / 2.0),
            velocity: Vec2::new(FLANKER_SHOT_SPEED, 0.0),
            damage: profile.shot_damage,
        },
        _ => Shot {
            kind: ShotKind::Bullet,
            origin: gun,
            velocity: straight,
            damage: profile.shot_damage,
        },
    }
}

/// Fully past either side edge by more than the removal margin.
pub fn is_off_screen(position: Vec2) -> bool {
    position.x < -ENEMY_OFFSCREEN_MARGIN || position.x > SCREEN_WIDTH + ENEMY_OFFSCREEN_MARGIN
}
