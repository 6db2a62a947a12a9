//! Collision and damage resolution.
//!
//! Three independent passes run once per tick after everything has moved:
//! player projectiles against enemies, enemy bodies against the player, and
//! enemy projectiles against the player. Spent projectiles are despawned at
//! the end of each pass; dead enemies are left for `cleanup`.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::*;
use skyraid_core::enums::Side;
use skyraid_core::events::AudioEvent;

use crate::particles::ParticleArena;
use crate::player::{HitOutcome, Player};
use crate::session::Session;

/// Everything a collision pass may mutate besides the world.
pub struct CollisionContext<'a> {
    pub player: &'a mut Player,
    pub session: &'a mut Session,
    pub particles: &'a mut ParticleArena,
    pub fx_rng: &'a mut ChaCha8Rng,
    pub audio_events: &'a mut Vec<AudioEvent>,
}

/// Run all three passes in order.
pub fn run(world: &mut World, ctx: &mut CollisionContext, despawn_buffer: &mut Vec<Entity>) {
    player_projectiles_vs_enemies(world, ctx, despawn_buffer);
    enemies_vs_player(world, ctx);
    enemy_projectiles_vs_player(world, ctx, despawn_buffer);
}

/// Each player projectile damages the first live enemy it overlaps, in spawn
/// order, and is consumed. One enemy per projectile per tick.
pub fn player_projectiles_vs_enemies(
    world: &mut World,
    ctx: &mut CollisionContext,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let enemies = super::enemies_in_spawn_order(world);

    for shot in super::projectiles_in_spawn_order(world, Side::Player) {
        let (shot_rect, damage) = {
            let Ok((projectile, pos, hitbox)) =
                world.query_one_mut::<(&Projectile, &Position, &Hitbox)>(shot)
            else {
                continue;
            };
            (hitbox.rect(pos.0), projectile.damage)
        };

        for &target in &enemies {
            let Ok((enemy, health, pos, hitbox)) =
                world.query_one_mut::<(&mut Enemy, &mut Health, &Position, &Hitbox)>(target)
            else {
                continue;
            };
            if enemy.dead {
                continue;
            }
            let enemy_rect = hitbox.rect(pos.0);
            if !shot_rect.intersects(&enemy_rect) {
                continue;
            }

            health.apply_damage(damage);
            despawn_buffer.push(shot);

            if health.is_depleted() {
                enemy.dead = true;
                ctx.session.record_kill(health.max().max(0) as u32);
                ctx.particles.enemy_explosion(enemy_rect.center(), ctx.fx_rng);
                ctx.audio_events.push(AudioEvent::Explosion);
                tracing::trace!(kind = ?enemy.kind, "enemy destroyed");
            } else {
                ctx.particles.enemy_hit(shot_rect.center(), ctx.fx_rng);
                ctx.audio_events.push(AudioEvent::Hit);
            }
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Ramming a live enemy kills a vulnerable player outright.
pub fn enemies_vs_player(world: &mut World, ctx: &mut CollisionContext) {
    if ctx.player.dead || ctx.player.invulnerable {
        return;
    }
    let player_rect = ctx.player.rect();

    for entity in super::enemies_in_spawn_order(world) {
        let Ok((enemy, pos, hitbox)) = world.query_one_mut::<(&Enemy, &Position, &Hitbox)>(entity)
        else {
            continue;
        };
        if enemy.dead || !player_rect.intersects(&hitbox.rect(pos.0)) {
            continue;
        }
        if ctx.player.ram() {
            ctx.particles.player_explosion(ctx.player.center(), ctx.fx_rng);
            ctx.audio_events.push(AudioEvent::Explosion);
            tracing::debug!(kind = ?enemy.kind, "player rammed");
        }
        break;
    }
}

/// Enemy projectiles touching the player are consumed; they only deal damage
/// outside the invulnerability window.
pub fn enemy_projectiles_vs_player(
    world: &mut World,
    ctx: &mut CollisionContext,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for entity in super::projectiles_in_spawn_order(world, Side::Enemy) {
        if ctx.player.dead {
            break;
        }
        let Ok((projectile, pos, hitbox)) =
            world.query_one_mut::<(&Projectile, &Position, &Hitbox)>(entity)
        else {
            continue;
        };
        if !hitbox.rect(pos.0).intersects(&ctx.player.rect()) {
            continue;
        }

        despawn_buffer.push(entity);
        match ctx.player.take_hit(projectile.damage) {
            HitOutcome::Killed => {
                ctx.particles.player_explosion(ctx.player.center(), ctx.fx_rng);
                ctx.audio_events.push(AudioEvent::Explosion);
            }
            HitOutcome::Flashed => {
                ctx.particles.player_hit(ctx.player.center(), ctx.fx_rng);
                ctx.audio_events.push(AudioEvent::Hit);
            }
            HitOutcome::Ignored => {}
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
