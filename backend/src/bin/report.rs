//! CNC Report Binary
//!
//! Loads a JSON file of observations and prints one dashboard view as JSON.
//!
//! # Usage
//!
//! ```bash
//! cnc-report observations.json            # hexbins
//! cnc-report observations.json gaps
//! cnc-report observations.json zones
//! cnc-report observations.json timing
//! ```
//!
//! # Environment Variables
//!
//! - `CNC_CONFIG`: Path to an analytics TOML file (default: search for `analytics.toml`)
//! - `CNC_HEX_RESOLUTION`, `CNC_GAP_THRESHOLD`, `CNC_GAP_LIMIT`,
//!   `CNC_RECOMMENDATION_SELECTION`, `CNC_RECOMMENDATION_SEED`: config overrides
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cnc_rust::config::AnalyticsConfig;
use cnc_rust::db::{load_observations_json, LocalRepository};
use cnc_rust::services;
use cnc_rust::AnalyticsResult;

const USAGE: &str = "usage: cnc-report <observations.json> [hexbins|gaps|zones|timing]";

#[derive(Debug, Clone, Copy)]
enum View {
    Hexbins,
    Gaps,
    Zones,
    Timing,
}

impl FromStr for View {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hexbins" => Ok(Self::Hexbins),
            "gaps" => Ok(Self::Gaps),
            "zones" => Ok(Self::Zones),
            "timing" => Ok(Self::Timing),
            other => bail!("unknown view '{}'\n{}", other, USAGE),
        }
    }
}

fn load_config() -> anyhow::Result<AnalyticsConfig> {
    let mut config = match env::var("CNC_CONFIG") {
        Ok(path) => AnalyticsConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        Err(_) => AnalyticsConfig::from_default_location().unwrap_or_else(|e| {
            info!("{}; using built-in defaults", e);
            AnalyticsConfig::default()
        }),
    };
    config
        .apply_env_overrides()
        .context("Invalid environment override")?;
    config.validate().context("Invalid analytics configuration")?;
    Ok(config)
}

/// Print `result` as JSON. A build without hex support prints `[]`.
fn emit<T: Serialize>(result: AnalyticsResult<Vec<T>>) -> anyhow::Result<()> {
    let rows = match result {
        Ok(rows) => rows,
        Err(e) if e.is_capability_unavailable() => {
            warn!("{}", e);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let path = args.next().context(USAGE)?;
    let view: View = args.next().as_deref().unwrap_or("hexbins").parse()?;

    let config = load_config()?;
    let observations = load_observations_json(&path)
        .with_context(|| format!("Failed to load observations from {}", path))?;

    let repo = LocalRepository::new();
    repo.set_snapshot(observations);
    info!(?view, resolution = config.grid.resolution, "Running report");

    match view {
        View::Hexbins => emit(services::get_hexbins(&repo, &config).await),
        View::Gaps => emit(services::get_gaps(&repo, &config).await),
        View::Zones => emit(services::get_priority_zones(&repo, &config).await),
        View::Timing => emit(services::get_timing_windows(&repo, &config).await),
    }
}
