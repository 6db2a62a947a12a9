//! Wave spawning system: injects level waves, or feeds endless mode.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use skyraid_enemy_ai::profiles::initial_state;

use crate::level::{EndlessSpawner, Level};
use crate::world_setup::{self, SpawnCounter};

/// Advance the active level's clock, or the endless timer when no level is
/// active, and spawn whatever is due. Returns the number of enemies spawned.
pub fn run(
    world: &mut World,
    counter: &mut SpawnCounter,
    rng: &mut ChaCha8Rng,
    level: Option<&mut Level>,
    endless: &mut EndlessSpawner,
) -> usize {
    match level {
        Some(level) => {
            let due = level.advance();
            for state in &due {
                world_setup::spawn_enemy(world, counter, state);
            }
            if !due.is_empty() {
                tracing::debug!(
                    level = level.number,
                    wave = level.current_wave,
                    enemies = due.len(),
                    "wave spawned"
                );
            }
            due.len()
        }
        None => match endless.advance(rng) {
            Some(kind) => {
                let state = initial_state(kind, rng);
                world_setup::spawn_enemy(world, counter, &state);
                1
            }
            None => 0,
        },
    }
}
