//! Group observations into hex cells and compute per-cell metrics.

use std::collections::{BTreeMap, HashSet};

use super::hexgrid::HexIndexer;
use crate::error::AnalyticsResult;
use crate::models::{biodiversity_yield, GridResolution, HexCell, HexId, Observation};

#[derive(Default)]
struct CellAccumulator<'a> {
    observation_count: u32,
    species: HashSet<&'a str>,
}

/// Bin `observations` into hex cells at `resolution`.
///
/// Every observation lands in exactly one cell, so the per-cell counts always
/// sum to the number of input observations. Cells come back ordered by hex id,
/// which makes repeated calls over the same input produce identical output.
/// `priority_score` is left unset for the scorer.
pub fn aggregate<'a, I>(
    observations: I,
    indexer: &dyn HexIndexer,
    resolution: GridResolution,
    habitat_type: &str,
) -> AnalyticsResult<Vec<HexCell>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut groups: BTreeMap<HexId, CellAccumulator<'a>> = BTreeMap::new();

    for obs in observations {
        let hex_id = indexer.cell_id_for(obs.latitude, obs.longitude, resolution)?;
        let acc = groups.entry(hex_id).or_default();
        acc.observation_count += 1;
        acc.species.insert(obs.species_name.as_str());
    }

    let mut cells = Vec::with_capacity(groups.len());
    for (hex_id, acc) in groups {
        let unique_species = acc.species.len() as u32;
        let center = indexer.center_of(&hex_id)?;
        let boundary = indexer.boundary_of(&hex_id)?;

        cells.push(HexCell {
            hex_id,
            center,
            boundary,
            observation_count: acc.observation_count,
            unique_species,
            biodiversity_yield: biodiversity_yield(unique_species, acc.observation_count),
            habitat_type: habitat_type.to_string(),
            priority_score: None,
        });
    }

    Ok(cells)
}
