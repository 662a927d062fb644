//! Terminal companion for a running simulation.
//!
//! Reads tick readings from stdin (one `"<tick> [speed]"` per line), turns
//! each new tick into a calendar snapshot and prints it, e.g.
//!
//! ```text
//! $ printf '0 3\n3456 4\n' | simclock-cli
//! Day 1, Week 1, Year 1 — 00:00 [Normal]
//! Day 1, Week 6, Year 1 — 00:00 [Fast]
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$SIMCLOCK_CONFIG` or `simclock-config.yaml`
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Poll stdin through the tick feed until it closes or stdout fails
//! 4. Log the feed summary

mod error;
mod printer;

use std::path::PathBuf;

use anyhow::Context;
use simclock_core::config::SimclockConfig;
use simclock_core::feed::{LineTickSource, run_feed};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::printer::LinePrinter;

/// Default configuration path, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "simclock-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path, found) = load_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("simclock-cli starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        poll_interval_ms = config.feed.poll_interval_ms,
        anchor_tick = ?config.display.anchor_tick,
        relative = ?config.display.relative,
        "Display configured"
    );

    let mut source = LineTickSource::new(BufReader::new(tokio::io::stdin()));
    let mut printer = LinePrinter::new(std::io::stdout().lock(), config.display.clone());

    let summary = run_feed(&mut source, &config.feed, &mut printer)
        .await
        .map_err(CliError::from)
        .context("polling ticks from stdin")?;
    let lines = printer.lines();
    printer.finish().context("printing snapshots")?;

    info!(
        end_reason = ?summary.end_reason,
        polls = summary.polls,
        lines,
        rejected = summary.rejected,
        regressions = summary.regressions,
        last_tick = ?summary.last_snapshot.map(|s| s.tick),
        "simclock-cli finished"
    );
    Ok(())
}

/// Load configuration, falling back to defaults plus environment overrides
/// when the file does not exist.
fn load_config() -> Result<(SimclockConfig, PathBuf, bool), CliError> {
    let path = std::env::var_os("SIMCLOCK_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimclockConfig::from_file(&path)?;
        Ok((config, path, true))
    } else {
        let mut config = SimclockConfig::default();
        config.apply_env_overrides()?;
        Ok((config, path, false))
    }
}
