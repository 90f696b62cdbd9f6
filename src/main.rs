//! Headless match-3 runner (default binary).
//!
//! Plays one seeded session with an autoplay strategy and prints one JSON
//! line per accepted swap, followed by a summary line. Logs go to stderr
//! (`RUST_LOG`, default `warn`) so stdout stays machine-readable.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use match3::core::{generation_exhausted_total, EngineConfig, GameState};
use match3::engine::{autoplay_with, Strategy};

#[derive(Debug, Parser)]
#[command(name = "match3-sim", about = "Play a seeded match-3 session headlessly")]
struct Cli {
    /// RNG seed (drawn from the clock when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Stop after this many swaps even if moves remain
    #[arg(long)]
    max_moves: Option<u32>,

    /// first-hint | greedy
    #[arg(long, default_value = "first-hint")]
    strategy: String,

    /// TOML file with engine settings; MATCH3_* variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spawn and trigger power tiles
    #[arg(long)]
    power_tiles: bool,

    /// Print only the summary line
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    seed: u32,
    strategy: &'static str,
    moves_played: u32,
    final_score: u32,
    reshuffles: u32,
    cascade_steps: u32,
    deepest_cascade: u32,
    generation_exhausted: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let strategy = Strategy::from_str(&cli.strategy)
        .ok_or_else(|| anyhow!("unknown strategy {:?}", cli.strategy))?;
    let config = load_config(&cli)?;

    let state = GameState::with_config(config, cli.seed)?;
    info!(seed = state.seed(), strategy = strategy.as_str(), "starting session");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error = None;

    let max_moves = cli.max_moves.unwrap_or(u32::MAX);
    let (end, report) = autoplay_with(&state, strategy, max_moves, |outcome| {
        if cli.quiet || write_error.is_some() {
            return;
        }
        let line = serde_json::to_string(&outcome.report())
            .map_err(anyhow::Error::from)
            .and_then(|json| writeln!(out, "{}", json).map_err(anyhow::Error::from));
        if let Err(e) = line {
            write_error = Some(e);
        }
    });
    if let Some(e) = write_error {
        return Err(e.context("writing move log"));
    }

    let summary = Summary {
        seed: end.seed(),
        strategy: strategy.as_str(),
        moves_played: report.moves_played,
        final_score: report.final_score,
        reshuffles: report.reshuffles,
        cascade_steps: report.cascade_steps,
        deepest_cascade: report.deepest_cascade,
        generation_exhausted: generation_exhausted_total(),
    };
    writeln!(out, "{}", serde_json::to_string(&summary)?)?;
    out.flush()?;

    info!(score = summary.final_score, moves = summary.moves_played, "session finished");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let base = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_toml_str(&text)?
        }
        None => EngineConfig::default(),
    };
    let config = base.with_env_overrides();
    Ok(if cli.power_tiles {
        config.with_power_tiles(true)
    } else {
        config
    })
}
