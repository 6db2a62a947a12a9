//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skyraid_core::components::*;
use skyraid_core::enums::{ControlScheme, GameState};
use skyraid_core::events::AudioEvent;
use skyraid_core::state::*;
use skyraid_core::types::SimTime;

use crate::particles::ParticleArena;
use crate::player::Player;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    state: GameState,
    control_scheme: ControlScheme,
    player: &Player,
    particles: &ParticleArena,
    score: ScoreView,
    level: Option<LevelView>,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        state,
        control_scheme,
        player: player.view(),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        particles: particles.views(),
        score,
        level,
        audio_events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(SpawnIndex, EnemyView)> = world
        .query::<(&Enemy, &EnemyBehavior, &Position, &Hitbox, &Health, &SpawnIndex)>()
        .iter()
        .map(|(_, (enemy, behavior, pos, hitbox, health, index))| {
            (
                *index,
                EnemyView {
                    kind: enemy.kind,
                    position: pos.0,
                    size: hitbox.size,
                    angle: behavior.heading_degrees(),
                    health_fraction: health.fraction(),
                    damage_state: health.damage_state(),
                },
            )
        })
        .collect();
    enemies.sort_by_key(|(index, _)| *index);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(SpawnIndex, ProjectileView)> = world
        .query::<(&Projectile, &Position, &Velocity, &Hitbox, &SpawnIndex)>()
        .iter()
        .map(|(_, (projectile, pos, vel, hitbox, index))| {
            (
                *index,
                ProjectileView {
                    class: projectile.class(),
                    side: projectile.side,
                    position: pos.0,
                    size: hitbox.size,
                    angle: draw_angle(projectile, vel),
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(index, _)| *index);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

/// Cosmetic rotation in degrees.
fn draw_angle(projectile: &Projectile, vel: &Velocity) -> f32 {
    match projectile.motion {
        ProjectileMotion::Straight => {
            if vel.0.y == 0.0 {
                0.0
            } else {
                (-vel.0.y).atan2(vel.0.x.abs()).to_degrees()
            }
        }
        ProjectileMotion::PlayerHoming { .. } => vel.0.y.atan2(vel.0.x).to_degrees(),
        ProjectileMotion::EnemyHoming { heading, .. } => heading.y.atan2(heading.x).to_degrees(),
        ProjectileMotion::Ballistic { rotation, .. } => rotation,
    }
}
