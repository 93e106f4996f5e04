use tracing::{debug, info};

use super::aggregate_snapshot;
use crate::algorithms::{default_indexer, generate, score, sort_by_priority, timing_windows, HexIndexer};
use crate::config::AnalyticsConfig;
use crate::db::ObservationRepository;
use crate::error::AnalyticsResult;
use crate::models::ObservationSet;
use crate::routes::strategy::{Recommendation, TimingWindow};

/// Score every cell, rank by priority and turn the top cells into
/// recommendations.
pub fn compute_priority_zones(
    observations: &ObservationSet,
    indexer: &dyn HexIndexer,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<Recommendation>> {
    let mut cells = aggregate_snapshot(observations, indexer, config)?;
    score(&mut cells);
    sort_by_priority(&mut cells);

    let mut picker = config.picker();
    let zones = generate(
        &cells,
        &config.tables(),
        &config.generator_settings(),
        &mut *picker,
    );

    debug!(
        cells = cells.len(),
        zones = zones.len(),
        selection = %config.recommendations.selection,
        "Generated priority zones"
    );
    Ok(zones)
}

pub fn compute_timing_windows(
    observations: &ObservationSet,
    config: &AnalyticsConfig,
) -> Vec<TimingWindow> {
    timing_windows(observations, config.timing.limit)
}

pub async fn get_priority_zones(
    repo: &dyn ObservationRepository,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<Recommendation>> {
    let indexer = default_indexer()?;
    let snapshot = repo.snapshot().await?;
    let zones = compute_priority_zones(&snapshot, indexer, config)?;

    info!(
        observations = snapshot.len(),
        zones = zones.len(),
        resolution = config.grid.resolution,
        checksum = %snapshot.checksum(),
        "Served priority zones"
    );
    Ok(zones)
}

/// Timing windows do not need the hex grid, so they work in every build.
pub async fn get_timing_windows(
    repo: &dyn ObservationRepository,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<TimingWindow>> {
    let snapshot = repo.snapshot().await?;
    let windows = compute_timing_windows(&snapshot, config);
    info!(
        observations = snapshot.len(),
        windows = windows.len(),
        "Served timing windows"
    );
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::aggregation::test_support::observation;
    use crate::algorithms::SquareGridIndexer;
    use crate::config::SelectionStrategy;
    use crate::db::LocalRepository;
    use crate::models::Observation;
    use chrono::NaiveTime;

    fn one_cell_each(n: usize) -> Vec<Observation> {
        (0..n)
            .map(|i| observation(i as i64, "Artemisia californica", 10.5 + i as f64, 20.5))
            .collect()
    }

    #[test]
    fn test_priority_zones_single_dense_cell() {
        let observations: Vec<Observation> = (0..100)
            .map(|i| {
                let species = if i % 2 == 0 { "a" } else { "b" };
                observation(i, species, 32.5, -117.5)
            })
            .collect();
        let set = ObservationSet::new(observations);

        let zones =
            compute_priority_zones(&set, &SquareGridIndexer, &AnalyticsConfig::default()).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].observation_count, 100);
        assert_eq!(zones[0].unique_species, 2);
        assert!((zones[0].priority_score - 0.4).abs() < 1e-9);
        assert_eq!(zones[0].name, "Priority Zone 1");
    }

    #[test]
    fn test_priority_zones_ranked_and_capped() {
        let mut observations = one_cell_each(14);
        // Make the first cell dense so it falls to the bottom of the ranking.
        for i in 0..9 {
            observations.push(observation(1000 + i, "Artemisia californica", 10.5, 20.5));
        }
        let set = ObservationSet::new(observations);

        let zones =
            compute_priority_zones(&set, &SquareGridIndexer, &AnalyticsConfig::default()).unwrap();
        assert_eq!(zones.len(), 10);
        assert!(zones
            .windows(2)
            .all(|w| w[0].priority_score >= w[1].priority_score));
        assert!(zones.iter().all(|z| z.zone_id != "10:20"));
    }

    #[test]
    fn test_priority_zones_respects_lower_limit() {
        let mut config = AnalyticsConfig::default();
        config.recommendations.limit = 3;
        let set = ObservationSet::new(one_cell_each(8));
        let zones = compute_priority_zones(&set, &SquareGridIndexer, &config).unwrap();
        assert_eq!(zones.len(), 3);
    }

    #[test]
    fn test_priority_zones_seeded_random_is_reproducible() {
        let mut config = AnalyticsConfig::default();
        config.recommendations.selection = SelectionStrategy::Random;
        config.recommendations.seed = Some(2024);
        let set = ObservationSet::new(one_cell_each(6));

        let a = compute_priority_zones(&set, &SquareGridIndexer, &config).unwrap();
        let b = compute_priority_zones(&set, &SquareGridIndexer, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_priority_zones_empty() {
        let zones = compute_priority_zones(
            &ObservationSet::empty(),
            &SquareGridIndexer,
            &AnalyticsConfig::default(),
        )
        .unwrap();
        assert!(zones.is_empty());
    }

    #[test]
    fn test_compute_timing_windows_uses_config_limit() {
        let mut config = AnalyticsConfig::default();
        config.timing.limit = 2;
        let observations: Vec<Observation> = (0..5)
            .map(|h| {
                let mut o = observation(h, "a", 32.5, -117.5);
                o.observed_at = NaiveTime::from_hms_opt(h as u32, 0, 0);
                o
            })
            .collect();
        let windows = compute_timing_windows(&ObservationSet::new(observations), &config);
        assert_eq!(windows.len(), 2);
    }

    #[tokio::test]
    async fn test_get_timing_windows_from_repository() {
        let mut timed = observation(1, "a", 32.5, -117.5);
        timed.observed_at = NaiveTime::from_hms_opt(7, 45, 0);
        let repo = LocalRepository::with_observations(vec![timed, observation(2, "b", 32.5, -117.5)]);

        let windows = get_timing_windows(&repo, &AnalyticsConfig::default())
            .await
            .unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].day_of_week, "Saturday");
        assert_eq!(windows[0].hour, 7);
    }

    #[tokio::test]
    async fn test_get_timing_windows_unhealthy_repository() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        let err = get_timing_windows(&repo, &AnalyticsConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::AnalyticsError::Repository(_)));
    }
}
