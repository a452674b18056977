//! `nodewar` - run a headless match from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use nodewar_app::game_loop::{self, LoopSettings};
use nodewar_app::orders::OrderSchedule;
use nodewar_app::state::{self, StopReason};
use nodewar_core::constants::TICK_RATE;
use nodewar_sim::SimConfig;

#[derive(Parser)]
#[command(name = "nodewar")]
#[command(about = "Headless node-capture strategy simulation", version)]
struct Cli {
    /// JSON file overriding engine tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON list of timed player commands
    #[arg(short, long)]
    orders: Option<PathBuf>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = TICK_RATE)]
    tick_rate: u32,

    /// Stop after this many seconds of loop time
    #[arg(long, default_value_t = 300.0)]
    max_secs: f64,

    /// Log filter, e.g. "info" or "nodewar_sim=debug" (RUST_LOG wins when set)
    #[arg(long, default_value = "info")]
    log: String,

    /// Run as fast as possible instead of in real time
    #[arg(long)]
    fast: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log));
    fmt().with_env_filter(filter).init();

    let config = load_config(cli.config.as_deref())?;
    let mut orders = load_orders(cli.orders.as_deref())?;
    if cli.tick_rate == 0 {
        anyhow::bail!("--tick-rate must be at least 1");
    }
    let settings = LoopSettings {
        tick_rate: cli.tick_rate,
        max_secs: Some(cli.max_secs),
        paced: !cli.fast,
    };

    let auto_start = orders.ensure_started();
    info!(
        orders = orders.orders.len(),
        auto_start,
        tick_rate = settings.tick_rate,
        max_secs = cli.max_secs,
        "starting nodewar"
    );

    let latest = state::shared_snapshot();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, orders, settings, latest)
        .context("failed to spawn game loop thread")?;

    let outcome = handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;
    drop(cmd_tx);

    let snap = &outcome.final_snapshot;
    match (outcome.reason, snap.winner) {
        (StopReason::GameOver, Some(winner)) => info!(
            ?winner,
            secs = snap.time.elapsed_secs,
            ticks = outcome.ticks,
            "match finished"
        ),
        (reason, _) => warn!(
            ?reason,
            secs = snap.time.elapsed_secs,
            units_in_flight = snap.units.len(),
            "match stopped without a winner"
        ),
    }
    for node in &snap.nodes {
        info!(
            node = node.id.0,
            owner = ?node.owner,
            units = node.unit_count,
            roads = node.connections.len(),
            "final node state"
        );
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = SimConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn load_orders(path: Option<&Path>) -> Result<OrderSchedule> {
    let Some(path) = path else {
        return Ok(OrderSchedule::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading orders {}", path.display()))?;
    OrderSchedule::from_json_str(&text)
        .with_context(|| format!("invalid orders {}", path.display()))
}
