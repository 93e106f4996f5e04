use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside `[-90, 90] x [-180, 180]`.
    pub fn is_valid(&self) -> bool {
        is_valid_wgs84(self.lat, self.lng)
    }
}

pub fn is_valid_wgs84(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}

/// Tessellation granularity. Higher values mean smaller, more numerous cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridResolution(u8);

impl GridResolution {
    pub const MAX: u8 = 15;
    /// Resolution 7, roughly 5.16 km² per cell.
    pub const DEFAULT: GridResolution = GridResolution(7);

    pub fn new(value: u8) -> AnalyticsResult<Self> {
        if value > Self::MAX {
            return Err(AnalyticsError::InvalidResolution { resolution: value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for GridResolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for GridResolution {
    type Error = AnalyticsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GridResolution> for u8 {
    fn from(r: GridResolution) -> Self {
        r.0
    }
}

impl std::fmt::Display for GridResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of one hex cell at a given resolution.
///
/// For the H3 backend this is the lowercase hexadecimal cell index
/// (e.g. `872830828ffffff`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexId(pub String);

impl HexId {
    pub fn new(value: impl Into<String>) -> Self {
        HexId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for HexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HexId {
    fn from(s: &str) -> Self {
        HexId(s.to_string())
    }
}
