use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use skyraid_app::game_loop;
use skyraid_app::state::{LoopSettings, SharedSnapshot};
use skyraid_campaign::save_load;
use skyraid_core::commands::PlayerCommand;
use skyraid_core::constants::LEVEL_COUNT;
use skyraid_sim::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "skyraid")]
#[command(about = "Run a SKYRAID session headless, flown by the autopilot")]
struct Args {
    /// RNG seed; the same seed and inputs replay the same session
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of ticks to run (60 per second)
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,

    /// Progress file, created on first run
    #[arg(long, default_value = "skyraid_save.json")]
    save: PathBuf,

    /// Play this campaign level instead of endless mode
    #[arg(long)]
    level: Option<u32>,

    /// Steer with the pointer scheme instead of the keyboard
    #[arg(long)]
    pointer: bool,

    /// Pace ticks in real time instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let progress = save_load::load_or_default(&args.save);

    let startup_commands = match args.level {
        Some(number) => {
            if number == 0 || number > LEVEL_COUNT {
                bail!("level {number} does not exist (1..={LEVEL_COUNT})");
            }
            if !progress.is_unlocked(number) {
                bail!(
                    "level {number} is locked; {} unlocked so far",
                    progress.levels_unlocked
                );
            }
            vec![
                PlayerCommand::OpenLevelSelect,
                PlayerCommand::StartLevel { number },
            ]
        }
        None => vec![PlayerCommand::StartEndless],
    };

    tracing::info!(
        seed = args.seed,
        ticks = args.ticks,
        level = ?args.level,
        save = %args.save.display(),
        "starting session"
    );

    let settings = LoopSettings {
        sim: SimConfig {
            seed: args.seed,
            ..SimConfig::default()
        },
        progress,
        save_path: Some(args.save),
        max_ticks: args.ticks,
        realtime: args.realtime,
        pointer: args.pointer,
        startup_commands,
        ..LoopSettings::default()
    };

    let latest: SharedSnapshot = Arc::new(Mutex::new(None));
    let (_cmd_tx, handle) = game_loop::spawn_game_loop(settings, latest.clone())?;
    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    let level = latest
        .lock()
        .ok()
        .and_then(|snap| snap.as_ref().and_then(|s| s.level.clone()));
    if let Some(level) = &level {
        tracing::info!(
            level = level.number,
            completed = level.completed,
            failed = level.failed,
            "level result"
        );
    }

    tracing::info!(
        ticks = summary.ticks,
        state = ?summary.final_state,
        final_score = summary.score.final_score,
        planes = summary.score.planes_destroyed,
        high_score = summary.score.high_score,
        unspent = summary.score.unspent_score,
        saves = summary.saves_written,
        "session finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary.score)?);

    Ok(())
}
