use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, HexCell};

// =========================================================
// Hotspot & gap types + routes
// =========================================================

/// GeoJSON polygon geometry with a single exterior ring, longitude first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoJsonPolygon {
    /// Build from a closed ring of `(lat, lng)` points. An empty ring gives a
    /// polygon with an empty exterior ring.
    pub fn from_ring(ring: &[GeoPoint]) -> Self {
        let exterior = ring.iter().map(|p| [p.lng, p.lat]).collect();
        Self {
            geometry_type: "Polygon".to_string(),
            coordinates: vec![exterior],
        }
    }

    pub fn exterior(&self) -> &[[f64; 2]] {
        self.coordinates.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One hex bin as served to the map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexBin {
    pub hex_id: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub observation_count: u32,
    pub unique_species: u32,
    pub biodiversity_yield: f64,
    pub habitat_type: String,
    pub priority_score: f64,
    pub geometry: GeoJsonPolygon,
}

impl HexBin {
    /// `unscored_priority` fills `priority_score` for cells no scorer has seen.
    pub fn from_cell(cell: &HexCell, unscored_priority: f64) -> Self {
        Self {
            hex_id: cell.hex_id.to_string(),
            center_lat: cell.center.lat,
            center_lng: cell.center.lng,
            observation_count: cell.observation_count,
            unique_species: cell.unique_species,
            biodiversity_yield: cell.biodiversity_yield,
            habitat_type: cell.habitat_type.clone(),
            priority_score: cell.priority_score.unwrap_or(unscored_priority),
            geometry: GeoJsonPolygon::from_ring(&cell.boundary),
        }
    }
}

/// Route function name constants
pub const GET_HEXBINS: &str = "get_hexbins";
pub const GET_GAPS: &str = "get_gaps";
