use serde::{Deserialize, Serialize};

use super::hotspots::GeoJsonPolygon;

// =========================================================
// Strategy types + routes
// =========================================================

/// A ranked priority zone with presentation guidance.
///
/// Owns copies of the originating cell's geometry and metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub zone_id: String,
    pub name: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_km: f64,
    pub priority_score: f64,
    pub observation_count: u32,
    pub unique_species: u32,
    pub biodiversity_yield: f64,
    pub habitat_type: String,
    pub recommended_time: String,
    pub target_taxa: Vec<String>,
    pub rationale: String,
    pub geometry: GeoJsonPolygon,
}

/// Observation yield for one weekday/hour slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingWindow {
    pub day_of_week: String,
    pub hour: u32,
    pub observation_count: u32,
    pub unique_species: u32,
    pub efficiency_score: f64,
}

/// Route function name constants
pub const GET_PRIORITY_ZONES: &str = "get_priority_zones";
pub const GET_TIMING_WINDOWS: &str = "get_timing_windows";
