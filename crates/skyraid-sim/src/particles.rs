//! Decorative particles.
//!
//! Particles never affect gameplay, so they live in a flat arena outside the
//! ECS world and draw only from the fx RNG.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::constants::*;
use skyraid_core::enums::ParticleKind;
use skyraid_core::state::ParticleView;

const EXPLOSION_PALETTE: [[u8; 3]; 6] = [
    [255, 255, 100],
    [255, 200, 50],
    [200, 200, 200],
    [120, 120, 120],
    [255, 255, 255],
    [100, 180, 255],
];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining lifetime in ticks.
    pub life: u32,
    pub size: f32,
    pub color: [u8; 3],
}

/// Owned pool of live particles. Removal is swap-remove, so order is not stable.
#[derive(Debug, Clone, Default)]
pub struct ParticleArena {
    particles: Vec<Particle>,
}

impl ParticleArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn push(&mut self, particle: Particle) {
        if particle.life > 0 {
            self.particles.push(particle);
        }
    }

    /// Move every particle and drop the ones whose lifetime ran out.
    pub fn update(&mut self) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.position += p.velocity;
            p.life = p.life.saturating_sub(1);
            if p.life == 0 {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Debris from a destroyed enemy.
    pub fn enemy_explosion(&mut self, center: Vec2, rng: &mut ChaCha8Rng) {
        for _ in 0..ENEMY_DEATH_PARTICLES {
            let color = *EXPLOSION_PALETTE.choose(rng).unwrap_or(&[255, 255, 255]);
            self.push(Particle {
                kind: ParticleKind::Death,
                position: center,
                velocity: Vec2::new(rng.gen_range(-2.0..=2.0), rng.gen_range(-2.0..=2.0)),
                life: rng.gen_range(15..=30),
                size: rng.gen_range(1..=4) as f32,
                color,
            });
        }
    }

    /// Fireball from the player's craft.
    pub fn player_explosion(&mut self, center: Vec2, rng: &mut ChaCha8Rng) {
        for _ in 0..PLAYER_DEATH_PARTICLES {
            self.push(Particle {
                kind: ParticleKind::Death,
                position: center,
                velocity: Vec2::new(rng.gen_range(-3.0..=3.0), rng.gen_range(-3.0..=3.0)),
                life: rng.gen_range(20..=40),
                size: rng.gen_range(2..=5) as f32,
                color: [255, rng.gen_range(100..=200), 0],
            });
        }
    }

    /// Sparks thrown off the player by a survivable hit.
    pub fn player_hit(&mut self, center: Vec2, rng: &mut ChaCha8Rng) {
        for _ in 0..PLAYER_HIT_PARTICLES {
            let color = *EXPLOSION_PALETTE.choose(rng).unwrap_or(&[255, 255, 255]);
            self.push(Particle {
                kind: ParticleKind::Hit,
                position: center,
                velocity: Vec2::new(rng.gen_range(-2.0..=2.0), rng.gen_range(-2.0..=2.0)),
                life: rng.gen_range(10..=18),
                size: rng.gen_range(2..=4) as f32,
                color,
            });
        }
    }

    /// Sparks where a projectile struck an enemy that survived.
    pub fn enemy_hit(&mut self, at: Vec2, rng: &mut ChaCha8Rng) {
        for _ in 0..ENEMY_HIT_PARTICLES {
            self.push(Particle {
                kind: ParticleKind::Hit,
                position: at,
                velocity: Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)),
                life: rng.gen_range(5..=10),
                size: rng.gen_range(1..=2) as f32,
                color: [255, rng.gen_range(100..=200), 0],
            });
        }
    }

    /// One smoke puff trailing from a damaged craft.
    pub fn smoke(&mut self, center: Vec2, rng: &mut ChaCha8Rng) {
        let grey = [
            rng.gen_range(50..=100),
            rng.gen_range(50..=100),
            rng.gen_range(50..=100),
        ];
        self.push(Particle {
            kind: ParticleKind::Smoke,
            position: center - Vec2::new(10.0, 0.0),
            velocity: Vec2::new(rng.gen_range(-1.0..=-0.5), rng.gen_range(-1.0..=-0.3)),
            life: rng.gen_range(20..=40),
            size: rng.gen_range(2..=4) as f32,
            color: grey,
        });
    }

    /// Exhaust behind a flanker, emitted at its tail.
    pub fn exhaust(&mut self, tail: Vec2, rng: &mut ChaCha8Rng) {
        self.push(Particle {
            kind: ParticleKind::Trail,
            position: tail,
            velocity: Vec2::new(rng.gen_range(-1.5..=-0.5), rng.gen_range(-0.3..=0.3)),
            life: rng.gen_range(15..=25),
            size: rng.gen_range(1..=3) as f32,
            color: [150, 150, 150],
        });
    }

    /// Sparks under a bomber as it releases a bomb. `belly` is its bottom-left corner.
    pub fn bomb_release(&mut self, belly: Vec2, rng: &mut ChaCha8Rng) {
        for _ in 0..BOMB_TRAIL_PARTICLES {
            self.push(Particle {
                kind: ParticleKind::Trail,
                position: belly + Vec2::new(rng.gen_range(0.0..=ENEMY_WIDTH), 0.0),
                velocity: Vec2::new(rng.gen_range(-0.4..=0.4), rng.gen_range(0.4..=1.0)),
                life: rng.gen_range(15..=30),
                size: rng.gen_range(1..=3) as f32,
                color: [255, rng.gen_range(50..=150), 0],
            });
        }
    }

    pub fn views(&self) -> Vec<ParticleView> {
        self.particles
            .iter()
            .map(|p| ParticleView {
                kind: p.kind,
                position: p.position,
                size: p.size,
                color: p.color,
                life: p.life,
            })
            .collect()
    }
}
