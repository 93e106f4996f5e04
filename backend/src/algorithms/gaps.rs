//! Under-sampled cell detection.

use crate::models::HexCell;

/// Threshold used by the gap listing.
pub const DEFAULT_GAP_THRESHOLD: u32 = 5;
/// Threshold of the generic gap query, kept for callers that want the looser cut.
pub const GENERIC_GAP_THRESHOLD: u32 = 10;
/// Maximum number of gaps surfaced to a client.
pub const DEFAULT_GAP_LIMIT: usize = 20;

/// `clamp(100 - 5 * count, 0, 100)`: fewer observations, higher priority.
pub fn gap_score(observation_count: u32) -> f64 {
    (100.0 - observation_count as f64 * 5.0).clamp(0.0, 100.0)
}

/// Cells with `observation_count < threshold`, each carrying its gap score as
/// `priority_score`, sorted by descending score.
///
/// The gap score replaces any score the cell already had. The sort is stable,
/// so cells with equal scores keep their input order.
pub fn identify_gaps(cells: &[HexCell], threshold: u32) -> Vec<HexCell> {
    let mut gaps: Vec<HexCell> = cells
        .iter()
        .filter(|cell| cell.observation_count < threshold)
        .map(|cell| HexCell {
            priority_score: Some(gap_score(cell.observation_count)),
            ..cell.clone()
        })
        .collect();

    gaps.sort_by(|a, b| {
        let a = a.priority_score.unwrap_or(0.0);
        let b = b.priority_score.unwrap_or(0.0);
        b.total_cmp(&a)
    });

    gaps
}
