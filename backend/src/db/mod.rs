//! Observation storage for the analytics pipeline.
//!
//! Services depend on the [`ObservationRepository`] trait, never on a concrete
//! store, so the in-memory repository used by tests and the report binary can
//! be swapped for another backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Service Layer (services/) - pipeline runs  │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  ObservationRepository trait                │
//! └───────────────────┬─────────────────────────┘
//!                     │
//!     ┌───────────────▼─────────────────┐
//!     │  LocalRepository (in-memory)    │
//!     └─────────────────────────────────┘
//! ```

pub mod checksum;
pub mod loaders;
pub mod repositories;
pub mod repository;

pub use checksum::calculate_checksum;
pub use loaders::{load_observations_json, parse_observations_json_str};
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, ObservationRepository, RepositoryError, RepositoryResult};
