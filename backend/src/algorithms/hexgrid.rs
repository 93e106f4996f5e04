//! Hex grid indexing: point → cell id, cell id → center / boundary.
//!
//! The production backend is H3 (via `h3o`), compiled in with the `h3`
//! feature. Builds without it still link, but [`default_indexer`] reports
//! [`AnalyticsError::CapabilityUnavailable`](crate::error::AnalyticsError::CapabilityUnavailable) so callers can tell "no spatial
//! support" apart from "no data".

use crate::error::AnalyticsResult;
use crate::models::{is_valid_wgs84, GeoPoint, GridResolution, HexId};

/// A global hexagonal tessellation.
///
/// Implementations must be deterministic: the same `(lat, lng, resolution)`
/// always maps to the same id, and an id always decodes to the same center and
/// boundary.
pub trait HexIndexer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn cell_id_for(&self, lat: f64, lng: f64, resolution: GridResolution) -> AnalyticsResult<HexId>;

    fn center_of(&self, hex_id: &HexId) -> AnalyticsResult<GeoPoint>;

    /// Closed ring of vertices; the first vertex is repeated at the end.
    fn boundary_of(&self, hex_id: &HexId) -> AnalyticsResult<Vec<GeoPoint>>;
}

/// Appends the first vertex to the end of `ring` unless it is already closed.
pub fn close_ring(mut ring: Vec<GeoPoint>) -> Vec<GeoPoint> {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if ring.len() > 1 && first != last {
            ring.push(first);
        }
    }
    ring
}

/// Square cells one degree on a side, ids formatted as `"{lat}:{lng}"`.
///
/// Not a hexagonal grid. Useful where H3 is not compiled in or where cell ids
/// need to be predictable, as in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquareGridIndexer;

impl SquareGridIndexer {
    fn parse(hex_id: &HexId) -> AnalyticsResult<(f64, f64)> {
        let invalid = || crate::error::AnalyticsError::InvalidCellId {
            hex_id: hex_id.to_string(),
        };
        let (lat, lng) = hex_id.as_str().split_once(':').ok_or_else(invalid)?;
        let lat: i32 = lat.parse().map_err(|_| invalid())?;
        let lng: i32 = lng.parse().map_err(|_| invalid())?;
        Ok((lat as f64, lng as f64))
    }
}

impl HexIndexer for SquareGridIndexer {
    fn name(&self) -> &'static str {
        "square-grid"
    }

    fn cell_id_for(&self, lat: f64, lng: f64, _: GridResolution) -> AnalyticsResult<HexId> {
        if !is_valid_wgs84(lat, lng) {
            return Err(crate::error::AnalyticsError::InvalidCoordinate { lat, lng });
        }
        Ok(HexId::new(format!("{}:{}", lat.floor() as i32, lng.floor() as i32)))
    }

    fn center_of(&self, hex_id: &HexId) -> AnalyticsResult<GeoPoint> {
        let (lat, lng) = Self::parse(hex_id)?;
        Ok(GeoPoint::new(lat + 0.5, lng + 0.5))
    }

    fn boundary_of(&self, hex_id: &HexId) -> AnalyticsResult<Vec<GeoPoint>> {
        let (lat, lng) = Self::parse(hex_id)?;
        Ok(close_ring(vec![
            GeoPoint::new(lat, lng),
            GeoPoint::new(lat, lng + 1.0),
            GeoPoint::new(lat + 1.0, lng + 1.0),
            GeoPoint::new(lat + 1.0, lng),
        ]))
    }
}

#[cfg(feature = "h3")]
pub use self::h3::H3Indexer;

#[cfg(feature = "h3")]
mod h3 {
    use std::str::FromStr;

    use h3o::{CellIndex, LatLng, Resolution};

    use super::{close_ring, HexIndexer};
    use crate::error::{AnalyticsError, AnalyticsResult};
    use crate::models::{is_valid_wgs84, GeoPoint, GridResolution, HexId};

    /// Uber H3 tessellation backed by the pure-Rust `h3o` crate.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct H3Indexer;

    impl H3Indexer {
        fn parse(hex_id: &HexId) -> AnalyticsResult<CellIndex> {
            CellIndex::from_str(hex_id.as_str()).map_err(|_| AnalyticsError::InvalidCellId {
                hex_id: hex_id.to_string(),
            })
        }
    }

    impl HexIndexer for H3Indexer {
        fn name(&self) -> &'static str {
            "h3"
        }

        fn cell_id_for(
            &self,
            lat: f64,
            lng: f64,
            resolution: GridResolution,
        ) -> AnalyticsResult<HexId> {
            let res = Resolution::try_from(resolution.value()).map_err(|_| {
                AnalyticsError::InvalidResolution {
                    resolution: resolution.value(),
                }
            })?;
            // h3o wraps out-of-range degrees instead of rejecting them.
            if !is_valid_wgs84(lat, lng) {
                return Err(AnalyticsError::InvalidCoordinate { lat, lng });
            }
            let point =
                LatLng::new(lat, lng).map_err(|_| AnalyticsError::InvalidCoordinate { lat, lng })?;
            Ok(HexId::new(point.to_cell(res).to_string()))
        }

        fn center_of(&self, hex_id: &HexId) -> AnalyticsResult<GeoPoint> {
            let center = LatLng::from(Self::parse(hex_id)?);
            Ok(GeoPoint::new(center.lat(), center.lng()))
        }

        fn boundary_of(&self, hex_id: &HexId) -> AnalyticsResult<Vec<GeoPoint>> {
            let boundary = Self::parse(hex_id)?.boundary();
            let ring = boundary
                .iter()
                .map(|v| GeoPoint::new(v.lat(), v.lng()))
                .collect();
            Ok(close_ring(ring))
        }
    }
}

/// The indexer compiled into this build.
#[cfg(feature = "h3")]
pub fn default_indexer() -> AnalyticsResult<&'static dyn HexIndexer> {
    static H3: H3Indexer = H3Indexer;
    Ok(&H3)
}

/// The indexer compiled into this build.
#[cfg(not(feature = "h3"))]
pub fn default_indexer() -> AnalyticsResult<&'static dyn HexIndexer> {
    Err(crate::error::AnalyticsError::capability_unavailable("h3"))
}
