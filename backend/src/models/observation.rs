use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::geo::is_valid_wgs84;
use crate::db::checksum::calculate_checksum;
use crate::define_id_type;

define_id_type!(i64, ObservationId);

/// A single citizen-science wildlife observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    pub species_name: String,
    pub taxon_group: String,
    pub latitude: f64,
    pub longitude: f64,
    pub observed_on: NaiveDate,
    /// Time of day, when the observer recorded one.
    #[serde(default)]
    pub observed_at: Option<NaiveTime>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Observation {
    pub fn has_valid_location(&self) -> bool {
        is_valid_wgs84(self.latitude, self.longitude)
    }
}

/// Immutable, shareable snapshot of the observations a request runs against.
///
/// Construction drops rows whose coordinates are non-finite or outside WGS84
/// bounds, so everything downstream can assume valid locations. The checksum
/// is computed once here. Cloning is a reference-count bump.
#[derive(Debug, Clone)]
pub struct ObservationSet {
    observations: Arc<[Observation]>,
    checksum: Arc<str>,
}

impl ObservationSet {
    pub fn new(observations: Vec<Observation>) -> Self {
        let total = observations.len();
        let kept: Vec<Observation> = observations
            .into_iter()
            .filter(Observation::has_valid_location)
            .collect();

        let dropped = total - kept.len();
        if dropped > 0 {
            warn!(dropped, kept = kept.len(), "Dropped observations without usable coordinates");
        }
        // Serializing plain structs of strings/numbers/dates cannot fail.
        let json = serde_json::to_string(&kept).unwrap_or_default();
        let checksum = calculate_checksum(&json);
        debug!(observations = kept.len(), checksum = %checksum, "Built observation snapshot");

        Self {
            observations: kept.into(),
            checksum: checksum.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// SHA-256 of the canonical JSON encoding of the snapshot.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}

impl Default for ObservationSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Observation>> for ObservationSet {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
