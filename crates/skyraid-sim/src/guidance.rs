//! Homing helpers shared by the player's missiles and the enemy missile law.

use glam::Vec2;
use hecs::World;

use skyraid_core::components::{Enemy, Hitbox, Position, SpawnIndex};
use skyraid_core::constants::MIN_TARGET_DISTANCE;
use skyraid_core::types::floored_distance;

/// Velocity of length `speed` from `from` toward `to`.
///
/// The distance is floored before dividing, so a target sitting on top of the
/// pursuer yields a short vector rather than NaN.
pub fn pure_pursuit(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let dist = floored_distance(delta, MIN_TARGET_DISTANCE);
    delta / dist * speed
}

/// Unit-ish heading from `from` toward `to` (distance floored at 1).
pub fn heading_to(from: Vec2, to: Vec2) -> Vec2 {
    pure_pursuit(from, to, 1.0)
}

/// Centres of all living enemies, in spawn order.
pub fn live_enemy_centers(world: &World) -> Vec<Vec2> {
    let mut live: Vec<(SpawnIndex, Vec2)> = world
        .query::<(&Enemy, &Position, &Hitbox, &SpawnIndex)>()
        .iter()
        .filter(|(_, (enemy, ..))| !enemy.dead)
        .map(|(_, (_, pos, hitbox, index))| (*index, hitbox.rect(pos.0).center()))
        .collect();
    live.sort_by_key(|(index, _)| *index);
    live.into_iter().map(|(_, center)| center).collect()
}

/// Point in `candidates` nearest to `from`. Ties go to the earliest entry.
pub fn nearest(candidates: &[Vec2], from: Vec2) -> Option<Vec2> {
    let mut best: Option<(f32, Vec2)> = None;
    for &candidate in candidates {
        let dist = candidate.distance(from);
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, candidate));
        }
    }
    best.map(|(_, point)| point)
}

/// Centre of the living enemy nearest to `from`.
pub fn nearest_enemy_center(world: &World, from: Vec2) -> Option<Vec2> {
    nearest(&live_enemy_centers(world), from)
}
