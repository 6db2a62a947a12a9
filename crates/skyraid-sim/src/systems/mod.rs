//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. Passes whose outcome depends on iteration order walk
//! entities sorted by `SpawnIndex`.

use hecs::{Entity, World};

use skyraid_core::components::{Enemy, Projectile, SpawnIndex};
use skyraid_core::enums::Side;

pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod player_control;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;

fn sorted(mut entries: Vec<(SpawnIndex, Entity)>) -> Vec<Entity> {
    entries.sort_unstable_by_key(|(index, _)| *index);
    entries.into_iter().map(|(_, entity)| entity).collect()
}

/// All enemy entities, oldest first.
pub fn enemies_in_spawn_order(world: &World) -> Vec<Entity> {
    sorted(
        world
            .query::<(&Enemy, &SpawnIndex)>()
            .iter()
            .map(|(entity, (_, index))| (*index, entity))
            .collect(),
    )
}

/// Projectiles fired by `side`, oldest first.
pub fn projectiles_in_spawn_order(world: &World, side: Side) -> Vec<Entity> {
    sorted(
        world
            .query::<(&Projectile, &SpawnIndex)>()
            .iter()
            .filter(|(_, (projectile, _))| projectile.side == side)
            .map(|(entity, (_, index))| (*index, entity))
            .collect(),
    )
}

/// Number of enemies not yet flagged dead.
pub fn live_enemy_count(world: &World) -> usize {
    world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| !enemy.dead)
        .count()
}
