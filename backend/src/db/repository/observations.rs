//! Observation repository trait.
//!
//! Services never own observation data; they ask a repository for the current
//! snapshot and run the pipeline over it.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::ObservationSet;

/// Source of observation snapshots.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Current observation snapshot.
    ///
    /// The returned set is immutable; a later reload publishes a new set
    /// without affecting callers that already hold this one.
    async fn snapshot(&self) -> RepositoryResult<Arc<ObservationSet>>;

    /// Check whether the repository can serve snapshots.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
