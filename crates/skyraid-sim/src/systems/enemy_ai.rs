//! Enemy AI system: advances every live enemy and turns their shots into projectiles.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::*;
use skyraid_core::constants::*;
use skyraid_core::enums::EnemyKind;
use skyraid_core::events::AudioEvent;
use skyraid_enemy_ai::behavior::{self, FireContext, Shot, ShotKind};

use crate::particles::ParticleArena;
use crate::world_setup::{self, SpawnCounter};

/// Run movement and firing for all live enemies, oldest first.
///
/// Gameplay randomness (cooldowns, bank angles) comes from `rng`; smoke and
/// exhaust come from `fx_rng`.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    counter: &mut SpawnCounter,
    rng: &mut ChaCha8Rng,
    fx_rng: &mut ChaCha8Rng,
    particles: &mut ParticleArena,
    player_position: Vec2,
    missile_lifespan: u32,
    audio_events: &mut Vec<AudioEvent>,
) {
    let ctx = FireContext { player_position };
    let mut shots: Vec<Shot> = Vec::new();

    for entity in super::enemies_in_spawn_order(world) {
        let Ok((enemy, enemy_behavior, pos, vel, health, hitbox)) = world
            .query_one_mut::<(
                &mut Enemy,
                &mut EnemyBehavior,
                &mut Position,
                &mut Velocity,
                &Health,
                &Hitbox,
            )>(entity)
        else {
            continue;
        };
        if enemy.dead {
            continue;
        }

        vel.0 = behavior::advance(enemy, enemy_behavior, &mut pos.0, rng);

        let rect = hitbox.rect(pos.0);
        if health.fraction() <= SMOKE_HEALTH_FRACTION && fx_rng.gen_bool(SMOKE_CHANCE) {
            particles.smoke(rect.center(), fx_rng);
        }
        if enemy.kind == EnemyKind::Flanker && fx_rng.gen_bool(FLANKER_TRAIL_CHANCE) {
            particles.exhaust(Vec2::new(rect.left() + 5.0, rect.center().y), fx_rng);
        }

        if behavior::should_fire(enemy, enemy_behavior, pos.0, &ctx) {
            let shot = behavior::fire(enemy, enemy_behavior, pos.0, rng);
            if shot.kind == ShotKind::Bomb {
                particles.bomb_release(Vec2::new(rect.left(), rect.bottom()), fx_rng);
            }
            shots.push(shot);
        }
    }

    for shot in &shots {
        world_setup::spawn_enemy_shot(world, counter, shot, missile_lifespan);
        audio_events.push(AudioEvent::Shoot);
    }
}
