//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes UI commands, runs all
//! systems, and produces `GameStateSnapshot`s. Completely headless (no window,
//! audio or filesystem access), enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyraid_campaign::{shop, Progress};
use skyraid_core::commands::PlayerCommand;
use skyraid_core::constants::*;
use skyraid_core::enums::{ControlScheme, GameState};
use skyraid_core::events::AudioEvent;
use skyraid_core::input::InputFrame;
use skyraid_core::state::GameStateSnapshot;
use skyraid_core::types::SimTime;
use skyraid_enemy_ai::behavior::Shot;
use skyraid_enemy_ai::profiles::SpawnState;

use crate::level::{EndlessSpawner, Level};
use crate::particles::ParticleArena;
use crate::player::Player;
use crate::session::Session;
use crate::systems;
use crate::systems::collision::CollisionContext;
use crate::world_setup::{self, SpawnCounter};

/// Offset between the gameplay and cosmetic RNG seeds.
const FX_SEED_SALT: u64 = 0x5EED_F00D;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Number of campaign levels; the last one unlocks nothing.
    pub level_count: u32,
    /// Ticks an enemy homing missile lives before expiring.
    pub enemy_missile_lifespan: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            level_count: LEVEL_COUNT,
            enemy_missile_lifespan: ENEMY_MISSILE_LIFESPAN_TICKS,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    state: GameState,
    control_scheme: ControlScheme,
    /// Gameplay randomness: spawns, cooldowns, weighted picks, banking.
    rng: ChaCha8Rng,
    /// Cosmetic randomness: particles only.
    fx_rng: ChaCha8Rng,
    spawn_counter: SpawnCounter,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,

    player: Player,
    particles: ParticleArena,
    session: Session,
    level: Option<Level>,
    endless: EndlessSpawner,
    progress: Progress,

    level_count: u32,
    enemy_missile_lifespan: u32,
    /// Set once the current run's score has been folded into progress.
    run_banked: bool,
    save_pending: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with default progress.
    pub fn new(config: SimConfig) -> Self {
        Self::with_progress(config, Progress::default())
    }

    /// Create a new simulation engine starting from previously saved progress.
    pub fn with_progress(config: SimConfig, progress: Progress) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            state: GameState::default(),
            control_scheme: ControlScheme::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            fx_rng: ChaCha8Rng::seed_from_u64(config.seed ^ FX_SEED_SALT),
            spawn_counter: SpawnCounter::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            player: Player::new(&progress.upgrades),
            particles: ParticleArena::new(),
            session: Session::default(),
            level: None,
            endless: EndlessSpawner::default(),
            progress,
            level_count: config.level_count.max(1),
            enemy_missile_lifespan: config.enemy_missile_lifespan,
            run_banked: false,
            save_pending: false,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, input: &InputFrame) -> GameStateSnapshot {
        self.process_commands();
        self.process_input_edges(input);

        if self.state.is_simulating() {
            self.run_systems(input);
            self.time.advance();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.state,
            self.control_scheme,
            &self.player,
            &self.particles,
            self.session
                .view(self.progress.high_score, self.progress.unspent_score),
            self.level
                .as_ref()
                .map(|level| level.view(self.session.level_failed)),
            audio_events,
        )
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn control_scheme(&self) -> ControlScheme {
        self.control_scheme
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player access, for scripted scenarios.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn particles(&self) -> &ParticleArena {
        &self.particles
    }

    /// Enemies not yet flagged dead.
    pub fn live_enemy_count(&self) -> usize {
        systems::live_enemy_count(&self.world)
    }

    /// Hand out progress that changed since the last call, if any. The caller
    /// owns persistence.
    pub fn take_pending_save(&mut self) -> Option<Progress> {
        if std::mem::take(&mut self.save_pending) {
            Some(self.progress.clone())
        } else {
            None
        }
    }

    /// Spawn an enemy outside the level schedule (scripted scenarios).
    pub fn spawn_enemy(&mut self, state: &SpawnState) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &mut self.spawn_counter, state)
    }

    /// Spawn a player bullet at `origin` (scripted scenarios).
    pub fn spawn_player_bullet(&mut self, origin: Vec2) -> Entity {
        world_setup::spawn_player_bullet(&mut self.world, &mut self.spawn_counter, origin)
    }

    /// Spawn an enemy projectile (scripted scenarios).
    pub fn spawn_enemy_shot(&mut self, shot: &Shot) -> Entity {
        world_setup::spawn_enemy_shot(
            &mut self.world,
            &mut self.spawn_counter,
            shot,
            self.enemy_missile_lifespan,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command. Commands that do not apply to the current
    /// state are dropped.
    fn handle_command(&mut self, command: PlayerCommand) {
        use GameState::*;

        if self.state == Quit {
            return;
        }

        let handled = match (&command, self.state) {
            (PlayerCommand::StartEndless, MainMenu | GameOver) => {
                self.start_run(None);
                true
            }
            (PlayerCommand::OpenLevelSelect, MainMenu) => {
                self.state = LevelSelect;
                true
            }
            (PlayerCommand::StartLevel { number }, LevelSelect | LevelComplete) => {
                self.try_start_level(*number)
            }
            (PlayerCommand::NextLevel, LevelComplete) => match self.level_number() {
                Some(number) => self.try_start_level(number + 1),
                None => false,
            },
            (PlayerCommand::ReplayLevel, LevelComplete) => match self.level_number() {
                Some(number) => self.try_start_level(number),
                None => false,
            },
            (PlayerCommand::ReturnToMenu, Paused | GameOver | LevelComplete | LevelSelect) => {
                if self.state == Paused {
                    self.bank_run();
                }
                self.state = MainMenu;
                true
            }
            (PlayerCommand::OpenShop, MainMenu | LevelComplete) => {
                self.state = Shop;
                true
            }
            (PlayerCommand::Purchase { upgrade }, Shop) => {
                match shop::purchase(&mut self.progress, &mut self.session.current_score, *upgrade)
                {
                    Ok(_) => {
                        self.save_pending = true;
                        true
                    }
                    Err(err) => {
                        tracing::debug!(%err, "purchase refused");
                        false
                    }
                }
            }
            (PlayerCommand::LeaveShop, Shop) => {
                self.leave_shop();
                true
            }
            (PlayerCommand::Pause, Playing) => {
                self.state = Paused;
                true
            }
            (PlayerCommand::Resume, Paused) => {
                self.state = Playing;
                true
            }
            (PlayerCommand::Escape, _) => {
                self.escape();
                true
            }
            (PlayerCommand::ToggleControlScheme, _) => {
                self.control_scheme = self.control_scheme.toggled();
                true
            }
            (PlayerCommand::ResetProgress, MainMenu) => {
                self.progress = Progress::default();
                self.save_pending = true;
                tracing::info!("progress reset");
                true
            }
            (PlayerCommand::Quit, _) => {
                self.state = Quit;
                true
            }
            _ => false,
        };

        if !handled {
            tracing::debug!(?command, state = ?self.state, "command ignored");
        }
    }

    /// The context-dependent back key.
    fn escape(&mut self) {
        use GameState::*;

        match self.state {
            Shop => self.leave_shop(),
            Playing => self.state = Paused,
            Paused => self.state = Playing,
            GameOver | LevelSelect | LevelComplete => self.state = MainMenu,
            MainMenu => self.state = Quit,
            Quit => {}
        }
    }

    fn level_number(&self) -> Option<u32> {
        self.level.as_ref().map(|level| level.number)
    }

    /// Edge-triggered controls carried by the input frame.
    fn process_input_edges(&mut self, input: &InputFrame) {
        if input.toggle_control && self.state != GameState::Quit {
            self.control_scheme = self.control_scheme.toggled();
        }
        if input.pause && self.state == GameState::Playing {
            self.state = GameState::Paused;
        }
    }

    fn try_start_level(&mut self, number: u32) -> bool {
        if number > self.level_count || !self.progress.is_unlocked(number) {
            return false;
        }
        self.start_run(Some(number));
        true
    }

    /// Reset every entity, timer and session counter and begin playing.
    fn start_run(&mut self, level: Option<u32>) {
        self.world.clear();
        self.spawn_counter.reset();
        self.despawn_buffer.clear();
        self.particles.clear();
        self.audio_events.clear();
        self.player = Player::new(&self.progress.upgrades);
        self.session = Session::default();
        self.level = level.map(|number| Level::build(number, &mut self.rng));
        self.endless = EndlessSpawner::default();
        self.time = SimTime::default();
        self.run_banked = false;
        self.state = GameState::Playing;

        match &self.level {
            Some(level) => tracing::info!(
                level = level.number,
                waves = level.wave_count(),
                enemies = level.enemy_total(),
                "level started"
            ),
            None => tracing::info!("endless run started"),
        }
    }

    /// The shop is only reachable after banking, so there is no session score
    /// left to fold in here.
    fn leave_shop(&mut self) {
        self.state = GameState::MainMenu;
    }

    /// Fold the run into persistent progress, once per run.
    fn bank_run(&mut self) {
        if self.run_banked {
            return;
        }
        self.run_banked = true;

        let score = self.session.current_score;
        self.progress
            .bank_session(score, self.session.planes_destroyed);
        self.session.final_score = score;
        self.session.current_score = 0;
        self.save_pending = true;

        tracing::info!(
            score,
            planes = self.session.planes_destroyed,
            high_score = self.progress.high_score,
            unspent = self.progress.unspent_score,
            "run banked"
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &InputFrame) {
        // While the death animation plays, only particles move.
        if self.player.dead {
            self.particles.update();
            if self.player.advance_death() {
                self.finish_death();
            }
            return;
        }

        // 1. Player steering, physics and weapons
        systems::player_control::run(
            &mut self.world,
            &mut self.spawn_counter,
            &mut self.player,
            input,
            self.control_scheme,
            &mut self.particles,
            &mut self.fx_rng,
            &mut self.audio_events,
        );
        // 2. Enemy movement and firing
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.spawn_counter,
            &mut self.rng,
            &mut self.fx_rng,
            &mut self.particles,
            self.player.position,
            self.enemy_missile_lifespan,
            &mut self.audio_events,
        );
        // 3. Projectile motion
        systems::projectiles::run(
            &mut self.world,
            self.player.position,
            &mut self.despawn_buffer,
        );
        // 4. Collision and damage
        let mut ctx = CollisionContext {
            player: &mut self.player,
            session: &mut self.session,
            particles: &mut self.particles,
            fx_rng: &mut self.fx_rng,
            audio_events: &mut self.audio_events,
        };
        systems::collision::run(&mut self.world, &mut ctx, &mut self.despawn_buffer);
        // 5. Cleanup (dead, off-screen)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 6. Particles
        self.particles.update();
        // 7. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.spawn_counter,
            &mut self.rng,
            self.level.as_mut(),
            &mut self.endless,
        );
        // 8. Level completion
        self.check_level_complete();
    }

    fn check_level_complete(&mut self) {
        let live = systems::live_enemy_count(&self.world);
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.completed || !level.is_complete(live) {
            return;
        }

        level.completed = true;
        let number = level.number;
        self.progress.record_completion(number, self.level_count);
        self.state = GameState::LevelComplete;
        tracing::info!(
            level = number,
            score = self.session.level_score,
            planes = self.session.level_planes_destroyed,
            "level complete"
        );
        self.bank_run();
    }

    /// The death animation finished: fail the level, or end the endless run.
    fn finish_death(&mut self) {
        match &self.level {
            Some(level) if !level.completed => {
                self.session.level_failed = true;
                self.state = GameState::LevelComplete;
                tracing::info!(level = level.number, "level failed");
            }
            Some(_) => self.state = GameState::LevelComplete,
            None => {
                self.state = GameState::GameOver;
                tracing::info!(score = self.session.current_score, "game over");
            }
        }
        self.bank_run();
    }
}
