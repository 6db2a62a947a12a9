//! Player control system: steering, flight physics, gun and missile launches.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::constants::SMOKE_CHANCE;
use skyraid_core::enums::ControlScheme;
use skyraid_core::events::AudioEvent;
use skyraid_core::input::InputFrame;

use crate::guidance;
use crate::particles::ParticleArena;
use crate::player::Player;
use crate::world_setup::{self, SpawnCounter};

/// Advance the player by one tick. Does nothing once the craft is dead.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    counter: &mut SpawnCounter,
    player: &mut Player,
    input: &InputFrame,
    scheme: ControlScheme,
    particles: &mut ParticleArena,
    fx_rng: &mut ChaCha8Rng,
    audio_events: &mut Vec<AudioEvent>,
) {
    if player.dead {
        return;
    }

    player.steer(input, scheme);
    if player.integrate() {
        particles.player_explosion(player.center(), fx_rng);
        audio_events.push(AudioEvent::Explosion);
        return;
    }

    if let Some(origin) = player.try_shoot(input.wants_fire()) {
        world_setup::spawn_player_bullet(world, counter, origin);
        audio_events.push(AudioEvent::Shoot);
    }

    if input.missile {
        // A missile is only spent when something is alive to chase.
        if let Some(target) = guidance::nearest_enemy_center(world, player.center()) {
            if let Some(origin) = player.take_missile() {
                world_setup::spawn_player_missile(world, counter, origin, target);
                audio_events.push(AudioEvent::Shoot);
            }
        }
    }

    player.tick_timers();

    if player.is_smoking() && fx_rng.gen_bool(SMOKE_CHANCE) {
        particles.smoke(player.center(), fx_rng);
    }
}
