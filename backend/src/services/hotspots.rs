use tracing::{debug, info};

use super::aggregate_snapshot;
use crate::algorithms::{default_indexer, identify_gaps, HexIndexer};
use crate::config::AnalyticsConfig;
use crate::db::ObservationRepository;
use crate::error::AnalyticsResult;
use crate::models::ObservationSet;
use crate::routes::hotspots::HexBin;

/// Every occupied cell, unscored, in hex-id order.
pub fn compute_hexbins(
    observations: &ObservationSet,
    indexer: &dyn HexIndexer,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<HexBin>> {
    let cells = aggregate_snapshot(observations, indexer, config)?;
    debug!(
        indexer = indexer.name(),
        observations = observations.len(),
        cells = cells.len(),
        "Aggregated hexbins"
    );

    let unscored = config.presentation.unscored_priority;
    Ok(cells
        .iter()
        .map(|cell| HexBin::from_cell(cell, unscored))
        .collect())
}

/// Under-sampled cells, highest gap score first, capped at `gaps.limit`.
pub fn compute_gaps(
    observations: &ObservationSet,
    indexer: &dyn HexIndexer,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<HexBin>> {
    let cells = aggregate_snapshot(observations, indexer, config)?;
    let mut gaps = identify_gaps(&cells, config.gaps.threshold);
    let found = gaps.len();
    gaps.truncate(config.gaps.limit);

    debug!(
        cells = cells.len(),
        gaps = found,
        threshold = config.gaps.threshold,
        "Identified coverage gaps"
    );

    let unscored = config.presentation.unscored_priority;
    Ok(gaps
        .iter()
        .map(|cell| HexBin::from_cell(cell, unscored))
        .collect())
}

pub async fn get_hexbins(
    repo: &dyn ObservationRepository,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<HexBin>> {
    let indexer = default_indexer()?;
    let snapshot = repo.snapshot().await?;
    let bins = compute_hexbins(&snapshot, indexer, config)?;

    info!(
        observations = snapshot.len(),
        hexbins = bins.len(),
        resolution = config.grid.resolution,
        checksum = %snapshot.checksum(),
        "Served hexbins"
    );
    Ok(bins)
}

pub async fn get_gaps(
    repo: &dyn ObservationRepository,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<HexBin>> {
    let indexer = default_indexer()?;
    let snapshot = repo.snapshot().await?;
    let gaps = compute_gaps(&snapshot, indexer, config)?;

    info!(
        observations = snapshot.len(),
        gaps = gaps.len(),
        resolution = config.grid.resolution,
        "Served gaps"
    );
    Ok(gaps)
}
