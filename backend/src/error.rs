//! Crate-level error type for the analytics pipeline.

use crate::db::repository::RepositoryError;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised by the spatial pipeline and its collaborators.
///
/// Empty inputs are never errors: an empty observation set produces empty
/// cell, gap and recommendation lists.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The hexagonal tessellation backend is not compiled into this build.
    ///
    /// Callers should treat this as "spatial views unavailable" and degrade to
    /// an empty result instead of failing the request.
    #[error("Capability unavailable: {capability} support is not enabled in this build")]
    CapabilityUnavailable { capability: String },

    /// Grid resolution outside the supported `0..=15` range.
    #[error("Invalid grid resolution {resolution}: expected 0..=15")]
    InvalidResolution { resolution: u8 },

    /// Latitude/longitude pair that is non-finite or outside WGS84 bounds.
    #[error("Invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// A hex id that does not decode to a cell.
    #[error("Invalid cell id: {hex_id}")]
    InvalidCellId { hex_id: String },

    /// Bad or unreadable configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failure from the observation repository.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AnalyticsError {
    pub fn capability_unavailable(capability: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            capability: capability.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the failure means "this build cannot do spatial indexing",
    /// as opposed to bad data or a repository fault.
    pub fn is_capability_unavailable(&self) -> bool {
        matches!(self, Self::CapabilityUnavailable { .. })
    }
}
