//! # CNC Rust Backend
//!
//! Spatial analytics engine for citizen-science biodiversity observations.
//!
//! This crate bins wildlife observations into hexagonal cells, finds
//! under-sampled areas and ranks cells into a short list of recommended survey
//! zones for an observation-planning dashboard.
//!
//! ## Features
//!
//! - **Hex Binning**: Map observations onto an H3 grid and compute per-cell
//!   counts, species richness and biodiversity yield
//! - **Gap Detection**: Surface cells with too few observations
//! - **Priority Scoring**: Rank cells by sparseness plus a diversity bonus
//! - **Recommendations**: Turn the top cells into presentation records
//! - **Timing Windows**: Rank weekday/hour slots by species per observation
//!
//! ## Architecture
//!
//! - [`algorithms`]: The synchronous pipeline (index, aggregate, gaps, score, recommend)
//! - [`db`]: Observation repository trait, in-memory repository and file loaders
//! - [`services`]: Async entry points that fetch a snapshot and run the pipeline
//! - [`routes`]: Response DTOs for each dashboard view
//! - [`config`]: TOML configuration with environment overrides
//! - [`api`]: Consolidated public types
//!
//! ## Cargo features
//!
//! - `h3` (default): hexagonal indexing through `h3o`. Without it, the spatial
//!   services return [`AnalyticsError::CapabilityUnavailable`].
//! - `cli` (default): the `cnc-report` binary and its log subscriber.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use error::{AnalyticsError, AnalyticsResult};
