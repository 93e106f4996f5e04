//! Public API surface for the analytics backend.
//!
//! This file consolidates the response DTOs and the domain types callers need
//! to build requests. All DTOs derive Serialize/Deserialize for JSON output.

pub use crate::routes::hotspots::GeoJsonPolygon;
pub use crate::routes::hotspots::HexBin;
pub use crate::routes::strategy::Recommendation;
pub use crate::routes::strategy::TimingWindow;

pub use crate::models::GeoPoint;
pub use crate::models::GridResolution;
pub use crate::models::HexCell;
pub use crate::models::HexId;
pub use crate::models::Observation;
pub use crate::models::ObservationId;
pub use crate::models::ObservationSet;

pub use crate::config::AnalyticsConfig;
pub use crate::error::{AnalyticsError, AnalyticsResult};
