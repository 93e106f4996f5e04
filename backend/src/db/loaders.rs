//! File loaders for observation data.

use std::fs;
use std::path::Path;

use tracing::info;

use super::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Observation, ObservationSet};

/// Parse a JSON array of observations from a string.
pub fn parse_observations_json_str(json: &str) -> RepositoryResult<ObservationSet> {
    let observations: Vec<Observation> = serde_json::from_str(json).map_err(|e| {
        RepositoryError::load_with_context(
            "Failed to parse observation JSON",
            ErrorContext::new("parse_observations_json_str").with_details(e.to_string()),
        )
    })?;
    Ok(ObservationSet::new(observations))
}

/// Load a JSON array of observations from `path`.
///
/// Rows with unusable coordinates are dropped (and logged) by
/// [`ObservationSet::new`]; the rest of the file must decode.
pub fn load_observations_json(path: impl AsRef<Path>) -> RepositoryResult<ObservationSet> {
    let path = path.as_ref();
    let context = || {
        ErrorContext::new("load_observations_json").with_source(path.display().to_string())
    };

    let content = fs::read_to_string(path).map_err(|e| {
        RepositoryError::load_with_context(
            "Failed to read observation file",
            context().with_details(e.to_string()),
        )
    })?;

    let set = parse_observations_json_str(&content).map_err(|e| match e {
        RepositoryError::LoadError { message, context: inner } => RepositoryError::LoadError {
            message,
            context: context().with_details(inner.details.unwrap_or_default()),
        },
        other => other,
    })?;

    info!(
        path = %path.display(),
        observations = set.len(),
        "Loaded observations"
    );
    Ok(set)
}
