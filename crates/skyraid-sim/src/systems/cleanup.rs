//! Cleanup system: removes enemies that are dead or have left the playfield.

use hecs::{Entity, World};

use skyraid_core::components::{Enemy, Position};
use skyraid_enemy_ai::behavior::is_off_screen;

/// Despawn dead and off-screen enemies.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (enemy, pos)) in world.query_mut::<(&Enemy, &Position)>() {
        if enemy.dead || is_off_screen(pos.0) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
