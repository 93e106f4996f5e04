//! In-memory local repository implementation.
//!
//! Holds the current [`ObservationSet`] behind a lock. Readers clone the `Arc`
//! and release the lock immediately, so a reload never blocks or mutates a
//! computation already in flight.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::db::repository::{
    ErrorContext, ObservationRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Observation, ObservationSet};

/// In-memory local repository.
///
/// # Example
/// ```
/// use cnc_rust::db::repositories::LocalRepository;
/// use cnc_rust::db::repository::ObservationRepository;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     assert!(repo.snapshot().await.unwrap().is_empty());
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    snapshot: Arc<ObservationSet>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(ObservationSet::empty()),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository seeded with `observations`.
    pub fn with_observations(observations: Vec<Observation>) -> Self {
        let repo = Self::new();
        repo.replace(observations);
        repo
    }

    /// Publish a new snapshot built from `observations`.
    ///
    /// Returns the number of observations kept after coordinate validation.
    pub fn replace(&self, observations: Vec<Observation>) -> usize {
        self.set_snapshot(ObservationSet::new(observations))
    }

    /// Publish an already-built snapshot.
    pub fn set_snapshot(&self, set: ObservationSet) -> usize {
        let kept = set.len();
        self.data.write().snapshot = Arc::new(set);
        info!(observations = kept, "Published observation snapshot");
        kept
    }

    /// Set the health status (for testing).
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Number of observations in the current snapshot.
    pub fn observation_count(&self) -> usize {
        self.data.read().snapshot.len()
    }

    /// Drop all observations, keeping the health flag.
    pub fn clear(&self) {
        self.data.write().snapshot = Arc::new(ObservationSet::empty());
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObservationRepository for LocalRepository {
    async fn snapshot(&self) -> RepositoryResult<Arc<ObservationSet>> {
        let data = self.data.read();
        if !data.is_healthy {
            return Err(RepositoryError::Unavailable {
                message: "Repository is not healthy".to_string(),
                context: ErrorContext::new("snapshot").with_source("local"),
            });
        }
        debug!(observations = data.snapshot.len(), "Serving observation snapshot");
        Ok(Arc::clone(&data.snapshot))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}
