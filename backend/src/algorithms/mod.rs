//! The spatial pipeline: index → aggregate → {gaps, score} → recommend.
//!
//! Everything here is synchronous and pure given its inputs; the service
//! layer handles fetching observation snapshots and configuration.

pub mod aggregation;
pub mod gaps;
pub mod hexgrid;
pub mod recommendations;
pub mod scoring;
pub mod timing;

pub use aggregation::aggregate;
pub use gaps::{gap_score, identify_gaps, DEFAULT_GAP_LIMIT, DEFAULT_GAP_THRESHOLD, GENERIC_GAP_THRESHOLD};
pub use hexgrid::{default_indexer, HexIndexer, SquareGridIndexer};
#[cfg(feature = "h3")]
pub use hexgrid::H3Indexer;
pub use recommendations::{
    generate, GeneratorSettings, OptionPicker, PresentationTables, RandomPicker, RankRotation,
    RECOMMENDATION_LIMIT, UNSCORED_PRIORITY,
};
pub use scoring::{score, sort_by_priority};
pub use timing::{timing_windows, DEFAULT_TIMING_LIMIT};
