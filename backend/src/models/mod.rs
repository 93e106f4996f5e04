//! Domain models: observations, geometry primitives and hex cells.

pub mod geo;
pub mod hex_cell;
pub mod macros;
pub mod observation;

pub use geo::*;
pub use hex_cell::*;
pub use observation::*;
