//! Game loop thread: runs the simulation engine at 60 Hz.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state for
//! polling, and pending progress saves are written from here.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;

use skyraid_campaign::{save_load, Progress};
use skyraid_core::commands::PlayerCommand;
use skyraid_core::constants::TICK_RATE;
use skyraid_core::enums::{ControlScheme, GameState};
use skyraid_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::state::{GameLoopCommand, LoopSettings, LoopSummary, SharedSnapshot};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the loop summary.
pub fn spawn_game_loop(
    settings: LoopSettings,
    latest_snapshot: SharedSnapshot,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skyraid-game-loop".into())
        .spawn(move || run_game_loop(settings, cmd_rx, &latest_snapshot))
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the tick budget is spent, the run ends or a
/// Shutdown command arrives.
fn run_game_loop(
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> LoopSummary {
    let LoopSettings {
        sim,
        progress,
        save_path,
        max_ticks,
        realtime,
        pointer,
        report_every,
        startup_commands,
    } = settings;

    let scheme = if pointer {
        ControlScheme::Pointer
    } else {
        ControlScheme::Keyboard
    };
    let mut engine = SimulationEngine::with_progress(sim, progress);
    if engine.control_scheme() != scheme {
        engine.queue_command(PlayerCommand::ToggleControlScheme);
    }
    engine.queue_commands(startup_commands);
    let mut autopilot = Autopilot::new(scheme);
    let mut saves_written = 0;
    let mut ticks = 0;
    let mut seen_playing = false;
    let mut next_tick_time = Instant::now();

    while ticks < max_ticks {
        // 1. Drain all pending commands
        if !drain_commands(&cmd_rx, &mut engine) {
            break;
        }

        // 2. Sample input and advance one tick
        let input = {
            let guard = latest_snapshot.lock().ok();
            autopilot.next_input(guard.as_deref().and_then(Option::as_ref))
        };
        let snapshot = engine.tick(&input);
        ticks += 1;

        // 3. Persist progress the engine asked to save
        if let Some(progress) = engine.take_pending_save() {
            saves_written += persist(save_path.as_deref(), &progress);
        }

        if report_every > 0 && ticks % report_every == 0 {
            tracing::info!(
                tick = snapshot.time.tick,
                elapsed_secs = snapshot.time.elapsed_secs(),
                state = ?snapshot.state,
                score = snapshot.score.current_score,
                planes = snapshot.score.planes_destroyed,
                health = snapshot.player.health,
                enemies = snapshot.enemies.len(),
                "status"
            );
        }

        let state = snapshot.state;
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. A finished run ends the session
        seen_playing |= state == GameState::Playing;
        if state == GameState::Quit
            || (seen_playing && matches!(state, GameState::GameOver | GameState::LevelComplete))
        {
            break;
        }

        // 5. Sleep until next tick
        if realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    // Out of ticks mid-run: bank what was earned so far.
    if matches!(engine.state(), GameState::Playing | GameState::Paused) {
        engine.queue_commands([PlayerCommand::Pause, PlayerCommand::ReturnToMenu]);
        let snapshot = engine.tick(&Default::default());
        if let Some(progress) = engine.take_pending_save() {
            saves_written += persist(save_path.as_deref(), &progress);
        }
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }
    }

    let score = engine
        .session()
        .view(engine.progress().high_score, engine.progress().unspent_score);
    LoopSummary {
        ticks,
        final_state: engine.state(),
        score,
        saves_written,
    }
}

/// Forward queued commands. Returns false on shutdown.
fn drain_commands(cmd_rx: &mpsc::Receiver<GameLoopCommand>, engine: &mut SimulationEngine) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            // The launcher may drop its sender once it has sent the start commands.
            Err(mpsc::TryRecvError::Disconnected) => return true,
        }
    }
}

/// Write progress if a save path is configured. Returns the number of files written.
fn persist(save_path: Option<&std::path::Path>, progress: &Progress) -> u32 {
    let Some(path) = save_path else {
        return 0;
    };
    match save_load::save(path, progress) {
        Ok(()) => 1,
        Err(err) => {
            tracing::error!(path = %path.display(), %err, "failed to save progress");
            0
        }
    }
}
