#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays High Striker against a simulated player.

mod config_file;
mod player;
mod terminal;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use clap::Parser;
use high_striker_core::{MinigameConfig, Phase, WELCOME_BANNER};
use high_striker_runtime::{GameListener, Minigame, SessionSummary};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{player::SimulatedPlayer, terminal::TerminalPresentation};

/// Simulated time after which a session is considered stuck.
const MAX_SIMULATED_SECS: u64 = 3_600;

/// Command-line arguments accepted by the High Striker simulator.
#[derive(Debug, Parser)]
#[command(
    name = "high-striker",
    version,
    about = "Plays High Striker against a simulated player"
)]
struct Cli {
    /// TOML file overriding the default configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed driving the simulated player.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Average clicking rate of the simulated player, capped at 100 per second.
    #[arg(long, default_value_t = 7.0)]
    clicks_per_second: f32,
    /// Length of a simulated frame in milliseconds.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..=1_000))]
    tick_ms: u64,
    /// Attempts played before the session is cancelled.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: u32,
    /// Prints the default configuration as TOML and exits.
    #[arg(long)]
    print_default_config: bool,
    /// Prints the session summary as JSON instead of a transcript.
    #[arg(long)]
    json: bool,
}

/// Logs session results through `tracing`.
struct ResultLog;

impl GameListener for ResultLog {
    fn on_game_win(&mut self) {
        info!("player won");
    }

    fn on_game_fail(&mut self) {
        info!("round failed");
    }

    fn on_game_complete(&mut self) {
        debug!("session complete");
    }
}

/// Entry point for the High Striker command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", config_file::render_default()?);
        return Ok(());
    }

    let config = config_file::load(cli.config.as_deref())?;
    let summary = play(&cli, config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn play(cli: &Cli, config: MinigameConfig) -> Result<SessionSummary> {
    let dt = Duration::from_millis(cli.tick_ms);
    let mut player = SimulatedPlayer::new(cli.seed, cli.clicks_per_second);
    let mut minigame = if cli.json {
        Minigame::new(config).with_presentation(TerminalPresentation::new(io::sink()))
    } else {
        println!("{WELCOME_BANNER}");
        Minigame::new(config).with_presentation(TerminalPresentation::new(io::stdout()))
    };
    let _ = minigame.subscribe(ResultLog);

    debug!(seed = cli.seed, clicks_per_second = cli.clicks_per_second, "starting session");
    minigame.start_game()?;

    let frame_budget = MAX_SIMULATED_SECS * 1_000 / cli.tick_ms;
    for _ in 0..frame_budget {
        match minigame.phase() {
            Phase::Idle => return Ok(minigame.summary().clone()),
            Phase::WaitingForStart => {
                if minigame.summary().attempts.len() >= cli.max_attempts as usize {
                    info!(attempts = cli.max_attempts, "attempt limit reached; giving up");
                    minigame.end_game();
                    continue;
                }
                if player.ready(dt) {
                    minigame.click();
                }
            }
            Phase::Charging => {
                for _ in 0..player.clicks(dt) {
                    minigame.click();
                }
            }
            Phase::Resolving => {}
        }
        minigame.advance(dt);
    }

    bail!("session did not finish within {MAX_SIMULATED_SECS} simulated seconds")
}

fn print_summary(summary: &SessionSummary) {
    println!();
    for record in &summary.attempts {
        println!(
            "attempt {}: {} clicks, {}% -> {}",
            record.attempt,
            record.clicks,
            terminal::percent(record.normalized_charge),
            terminal::verdict_label(record.verdict)
        );
    }
    println!("{}", if summary.won() { "result: won" } else { "result: gave up" });
}
