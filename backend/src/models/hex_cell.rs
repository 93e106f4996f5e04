use serde::{Deserialize, Serialize};

use super::geo::{GeoPoint, HexId};

/// Habitat label applied until a real habitat classifier exists.
pub const DEFAULT_HABITAT_TYPE: &str = "Mixed";

/// One hex cell touched by at least one observation, with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    pub hex_id: HexId,
    pub center: GeoPoint,
    /// Closed ring: the first vertex is repeated as the last.
    pub boundary: Vec<GeoPoint>,
    pub observation_count: u32,
    pub unique_species: u32,
    pub biodiversity_yield: f64,
    pub habitat_type: String,
    /// `None` until a scorer has run over the cell.
    pub priority_score: Option<f64>,
}

/// Unique species per observation. Zero observations yields 0.0.
pub fn biodiversity_yield(unique_species: u32, observation_count: u32) -> f64 {
    if observation_count == 0 {
        return 0.0;
    }
    unique_species as f64 / observation_count as f64
}
