//! Priority scoring of aggregated hex cells.

use std::cmp::Ordering;

use crate::models::HexCell;

/// Maximum bonus a perfectly diverse cell (yield = 1.0) receives.
pub const YIELD_BONUS: f64 = 20.0;

/// Score every cell in place on a 0–100 scale.
///
/// `base = 100 * (1 - count / max_count)` rewards sparsely observed cells;
/// `yield * 20` is added on top and the sum is clamped to `[0, 100]`. The cell
/// with the batch's maximum count therefore scores only its yield bonus.
///
/// Does not reorder `cells`; see [`sort_by_priority`].
pub fn score(cells: &mut [HexCell]) {
    let max_obs = cells
        .iter()
        .map(|c| c.observation_count)
        .max()
        .unwrap_or(0);

    for cell in cells.iter_mut() {
        let base = if max_obs == 0 {
            0.0
        } else {
            100.0 * (1.0 - cell.observation_count as f64 / max_obs as f64)
        };
        let boosted = base + cell.biodiversity_yield * YIELD_BONUS;
        cell.priority_score = Some(boosted.clamp(0.0, 100.0));
    }
}

/// Stable sort by descending `priority_score`; unscored cells go last.
pub fn sort_by_priority(cells: &mut [HexCell]) {
    cells.sort_by(|a, b| match (a.priority_score, b.priority_score) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
