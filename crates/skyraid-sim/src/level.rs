//! Campaign levels and the endless-mode spawner.
//!
//! A `Level` is a list of timed waves whose enemies are rolled up front from
//! the gameplay RNG, so a seed fully determines a level's contents. Stored in
//! `SimulationEngine`, NOT in the ECS world.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use skyraid_core::constants::*;
use skyraid_core::enums::EnemyKind;
use skyraid_core::state::LevelView;
use skyraid_enemy_ai::profiles::{initial_state, SpawnState};

/// A timed batch of enemies.
#[derive(Debug, Clone)]
pub struct Wave {
    /// Level tick at which this wave is injected.
    pub delay: u32,
    pub enemies: Vec<SpawnState>,
}

#[derive(Debug, Clone)]
pub struct Level {
    pub number: u32,
    pub waves: Vec<Wave>,
    /// Playing ticks since the level started.
    pub tick: u32,
    /// Index of the next wave to inject.
    pub current_wave: usize,
    pub all_waves_spawned: bool,
    /// Set once and never cleared for the life of this level instance.
    pub completed: bool,
}

/// Pick a variant from `weights`, indexed in `EnemyKind::ALL` order.
pub fn pick_weighted<R: Rng + ?Sized>(weights: &[u32; 7], rng: &mut R) -> EnemyKind {
    match WeightedIndex::new(weights) {
        Ok(dist) => EnemyKind::ALL[dist.sample(rng)],
        Err(_) => EnemyKind::Drifter,
    }
}

/// Wave plan for a level: (delay, variants). Generated levels draw their
/// variants from `rng`.
pub fn wave_plan<R: Rng + ?Sized>(number: u32, rng: &mut R) -> Vec<(u32, Vec<EnemyKind>)> {
    use EnemyKind::*;

    match number {
        1 => vec![(60, vec![Drifter; 3]), (180, vec![Drifter; 5])],
        2 => vec![
            (60, vec![Drifter, Drifter, Sentry]),
            (180, vec![Sentry, Sentry, Drifter]),
        ],
        3 => vec![
            (60, vec![Patroller, Patroller]),
            (180, vec![Sentry, Sentry, Drifter, Drifter]),
        ],
        4 => vec![
            (60, vec![Launcher]),
            (180, vec![Drifter, Drifter, Sentry, Sentry]),
            (300, vec![Launcher, Drifter, Drifter]),
        ],
        5 => vec![
            (60, vec![Banker]),
            (120, vec![Banker]),
            (240, vec![Patroller, Patroller, Sentry]),
        ],
        6 => vec![(60, vec![Flanker; 3]), (180, vec![Flanker, Drifter, Drifter])],
        7 => vec![
            (60, vec![Bomber]),
            (180, vec![Bomber, Drifter, Drifter]),
            (300, vec![Bomber, Bomber]),
        ],
        n => {
            let wave_count = (2 + n / 5).min(5);
            let per_wave = (3 + n / 3).min(10);
            (0..wave_count)
                .map(|i| {
                    let kinds = (0..per_wave)
                        .map(|_| pick_weighted(&LEVEL_SPAWN_WEIGHTS, rng))
                        .collect();
                    (60 + 120 * i, kinds)
                })
                .collect()
        }
    }
}

impl Level {
    /// Build level `number` with every enemy pre-rolled.
    pub fn build<R: Rng + ?Sized>(number: u32, rng: &mut R) -> Self {
        let waves = wave_plan(number, rng)
            .into_iter()
            .map(|(delay, kinds)| Wave {
                delay,
                enemies: kinds.into_iter().map(|k| initial_state(k, rng)).collect(),
            })
            .collect();

        Self {
            number,
            waves,
            tick: 0,
            current_wave: 0,
            all_waves_spawned: false,
            completed: false,
        }
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Total enemies across all waves.
    pub fn enemy_total(&self) -> usize {
        self.waves.iter().map(|w| w.enemies.len()).sum()
    }

    /// Advance the level clock by one tick and return any enemies due now.
    pub fn advance(&mut self) -> Vec<SpawnState> {
        self.tick += 1;

        let mut due = Vec::new();
        if let Some(wave) = self.waves.get_mut(self.current_wave) {
            if self.tick >= wave.delay {
                due = std::mem::take(&mut wave.enemies);
                self.current_wave += 1;
            }
        }
        if self.current_wave >= self.waves.len() {
            self.all_waves_spawned = true;
        }
        due
    }

    /// Complete once every wave is out and no tracked enemy is alive.
    pub fn is_complete(&self, live_enemies: usize) -> bool {
        self.all_waves_spawned && live_enemies == 0
    }

    pub fn view(&self, failed: bool) -> LevelView {
        LevelView {
            number: self.number,
            tick: self.tick,
            current_wave: self.current_wave,
            wave_count: self.waves.len(),
            all_waves_spawned: self.all_waves_spawned,
            completed: self.completed,
            failed,
        }
    }
}

/// Timer-driven spawner used when no level is active.
#[derive(Debug, Clone, Default)]
pub struct EndlessSpawner {
    pub timer: u32,
}

impl EndlessSpawner {
    /// Tick the timer; once it passes the interval, pick one variant and reset.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<EnemyKind> {
        self.timer += 1;
        if self.timer > ENDLESS_SPAWN_INTERVAL {
            self.timer = 0;
            Some(pick_weighted(&ENDLESS_SPAWN_WEIGHTS, rng))
        } else {
            None
        }
    }
}
