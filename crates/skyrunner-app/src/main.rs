use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use skyrunner_app::autopilot::Autopilot;
use skyrunner_app::game_loop::spawn_game_loop;
use skyrunner_app::state::{GameLoopCommand, Pacing};
use skyrunner_core::tuning::Tuning;
use skyrunner_sim::engine::SimConfig;

#[derive(Parser)]
#[command(name = "skyrunner", about = "Run SKYRUNNER headless with a scripted pilot")]
struct Cli {
    /// RNG seed for the enemy waves
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Stop after this many ticks
    #[arg(short, long, default_value = "3600")]
    ticks: u64,

    /// Pace the loop at 60 Hz instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding gameplay tuning
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Restart after each round instead of stopping
    #[arg(long)]
    keep_playing: bool,

    /// Log the HUD every N ticks
    #[arg(long, default_value = "60")]
    hud_every: u64,
}

fn load_tuning(path: Option<&Path>) -> anyhow::Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid tuning file {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let tuning = load_tuning(cli.tuning.as_deref())?;
    let pacing = if cli.realtime {
        Pacing::Realtime
    } else {
        Pacing::Unpaced
    };
    info!(seed = cli.seed, ticks = cli.ticks, ?pacing, "starting skyrunner");

    let handle = spawn_game_loop(
        SimConfig {
            seed: cli.seed,
            tuning,
        },
        pacing,
    )
    .context("failed to spawn game loop thread")?;

    let mut autopilot = Autopilot::new(cli.keep_playing);
    let hud_every = cli.hud_every.max(1);
    let mut rounds = 0u32;

    if pacing == Pacing::Unpaced {
        handle.send(GameLoopCommand::Advance);
    }
    while let Ok(snapshot) = handle.snapshots.recv() {
        let tick = snapshot.time.tick;
        if tick % hud_every == 0 {
            let hud = snapshot.hud;
            info!(
                tick,
                phase = ?snapshot.phase,
                speed = hud.speed,
                altitude = hud.altitude,
                health = hud.health,
                enemies = hud.enemies_remaining,
                score = hud.score,
                "hud"
            );
        }
        if let Some(notification) = snapshot.notification {
            rounds += 1;
            info!(
                tick,
                outcome = ?notification.outcome,
                score = notification.final_score,
                "{}",
                notification.message().replace('\n', " | ")
            );
        }

        if tick >= cli.ticks || (rounds > 0 && !cli.keep_playing) {
            break;
        }

        let mut open = true;
        for event in autopilot.next_inputs(&snapshot) {
            open &= handle.send(GameLoopCommand::Input(event));
        }
        if pacing == Pacing::Unpaced {
            open &= handle.send(GameLoopCommand::Advance);
        }
        if !open {
            warn!(tick, "game loop stopped early");
            break;
        }
    }

    handle.send(GameLoopCommand::Shutdown);
    let ticks = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))??;
    info!(ticks, rounds, "skyrunner finished");
    Ok(())
}
