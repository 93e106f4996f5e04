//! Service layer for business logic and orchestration.
//!
//! Each view has a synchronous `compute_*` function that runs the pipeline over
//! an observation snapshot, and an async `get_*` twin that fetches the snapshot
//! from an [`ObservationRepository`](crate::db::ObservationRepository) first.

pub mod hotspots;
pub mod strategy;

pub use hotspots::{compute_gaps, compute_hexbins, get_gaps, get_hexbins};
pub use strategy::{
    compute_priority_zones, compute_timing_windows, get_priority_zones, get_timing_windows,
};

use crate::algorithms::{aggregate, HexIndexer};
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;
use crate::models::{HexCell, ObservationSet};

/// Aggregate a snapshot with the configured resolution and habitat label.
pub(crate) fn aggregate_snapshot(
    observations: &ObservationSet,
    indexer: &dyn HexIndexer,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<HexCell>> {
    let resolution = config.resolution()?;
    aggregate(
        observations,
        indexer,
        resolution,
        &config.presentation.habitat_type,
    )
}
