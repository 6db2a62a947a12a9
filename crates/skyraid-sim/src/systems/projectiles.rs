//! Projectile motion system.
//!
//! Advances every projectile by its motion law and despawns the ones that
//! left the playfield or outlived their lifespan. Damage is not applied here.

use glam::Vec2;
use hecs::{Entity, World};

use skyraid_core::components::*;
use skyraid_core::constants::*;

use crate::guidance;

/// Advance all projectiles. `player_position` is the player's top-left corner,
/// which enemy missiles chase.
pub fn run(world: &mut World, player_position: Vec2, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let enemy_centers = guidance::live_enemy_centers(world);

    for (entity, (projectile, pos, vel, hitbox)) in
        world.query_mut::<(&mut Projectile, &mut Position, &mut Velocity, &Hitbox)>()
    {
        // Judged on the age before this tick's increment: a missile outlives its
        // creation tick by exactly `lifespan` ticks.
        let expired = projectile.is_expired();
        let alive = match &mut projectile.motion {
            ProjectileMotion::Straight => {
                pos.0 += vel.0;
                !hitbox.rect(pos.0).is_outside_screen(0.0)
            }
            ProjectileMotion::PlayerHoming { speed } => {
                // Keeps its last velocity once nothing is left to chase.
                if let Some(target) = guidance::nearest(&enemy_centers, pos.0) {
                    vel.0 = guidance::pure_pursuit(pos.0, target, *speed);
                }
                pos.0 += vel.0;
                !hitbox.rect(pos.0).is_outside_screen(MISSILE_OFFSCREEN_MARGIN)
            }
            ProjectileMotion::EnemyHoming {
                speed,
                heading,
                age,
                retarget_timer,
                retarget_interval,
                ..
            } => {
                if expired {
                    false
                } else {
                    *age += 1;
                    if *retarget_timer == 0 {
                        *heading = guidance::heading_to(pos.0, player_position);
                        *retarget_timer = (*retarget_interval).max(1);
                    }
                    *retarget_timer -= 1;
                    vel.0 = *heading * *speed - Vec2::new(ENEMY_MISSILE_DRIFT, 0.0);
                    pos.0 += vel.0;
                    !hitbox.rect(pos.0).is_outside_screen(MISSILE_OFFSCREEN_MARGIN)
                }
            }
            ProjectileMotion::Ballistic { rotation, spin } => {
                pos.0 += vel.0;
                *rotation = (*rotation + *spin).rem_euclid(360.0);
                pos.0.y < SCREEN_HEIGHT
            }
        };

        if !alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
