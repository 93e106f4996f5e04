//! Repository implementations module.
//!
//! - `local`: in-memory implementation backed by a swappable snapshot
pub mod local;

pub use local::LocalRepository;
