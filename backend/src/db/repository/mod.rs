//! Repository trait and error types.

pub mod error;
pub mod observations;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use observations::ObservationRepository;
