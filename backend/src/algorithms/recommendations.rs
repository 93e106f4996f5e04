//! Turn the top-ranked cells into human-facing recommendation records.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{GeoPoint, HexCell};
use crate::routes::hotspots::GeoJsonPolygon;
use crate::routes::strategy::Recommendation;

/// Hard cap on recommendations per call.
pub const RECOMMENDATION_LIMIT: usize = 10;
pub const DEFAULT_RADIUS_KM: f64 = 2.0;
/// Priority reported for cells that reach presentation without a score.
pub const UNSCORED_PRIORITY: f64 = 50.0;
/// Used when a cell arrives without a usable center (downtown San Diego).
pub const FALLBACK_CENTER: GeoPoint = GeoPoint {
    lat: 32.7,
    lng: -117.1,
};

/// Text tables the generator draws presentation fields from.
///
/// These stand in for a temporal-efficiency model and a taxon-gap model; they
/// are not derived from the cell's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationTables {
    pub recommended_times: Vec<String>,
    pub target_taxa: Vec<Vec<String>>,
    pub rationales: Vec<String>,
}

impl Default for PresentationTables {
    fn default() -> Self {
        let strings = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            recommended_times: strings(&[
                "Early morning (6-9 AM)",
                "Late afternoon (4-7 PM)",
                "Morning (9-12 PM)",
            ]),
            target_taxa: vec![
                strings(&["Birds", "Insects"]),
                strings(&["Plants", "Fungi"]),
                strings(&["Reptiles", "Amphibians"]),
                strings(&["Mammals", "Birds"]),
            ],
            rationales: strings(&[
                "Undersampled area with high biodiversity potential",
                "Low observation density despite habitat diversity",
                "Gap in spatial coverage, accessible location",
                "Adjacent to known hotspots but underexplored",
            ]),
        }
    }
}

impl PresentationTables {
    pub fn has_empty_table(&self) -> bool {
        self.recommended_times.is_empty() || self.target_taxa.is_empty() || self.rationales.is_empty()
    }
}

/// Chooses which entry of a presentation table a zone gets.
pub trait OptionPicker {
    /// Index in `0..len` for the zone at `rank`. `len` is never zero.
    fn pick(&mut self, rank: usize, len: usize) -> usize;
}

/// `rank % len`: stable output for identical input.
#[derive(Debug, Default, Clone, Copy)]
pub struct RankRotation;

impl OptionPicker for RankRotation {
    fn pick(&mut self, rank: usize, len: usize) -> usize {
        rank % len
    }
}

/// Uniform choice from an injected random source.
#[derive(Debug)]
pub struct RandomPicker<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OptionPicker for RandomPicker<R> {
    fn pick(&mut self, _rank: usize, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Settings the generator needs beyond the tables.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub limit: usize,
    pub radius_km: f64,
    pub fallback_center: GeoPoint,
    pub unscored_priority: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            limit: RECOMMENDATION_LIMIT,
            radius_km: DEFAULT_RADIUS_KM,
            fallback_center: FALLBACK_CENTER,
            unscored_priority: UNSCORED_PRIORITY,
        }
    }
}

fn choose<'t, T>(table: &'t [T], picker: &mut dyn OptionPicker, rank: usize) -> Option<&'t T> {
    if table.is_empty() {
        return None;
    }
    let idx = picker.pick(rank, table.len()).min(table.len() - 1);
    table.get(idx)
}

/// One record per cell, in input order, for at most
/// `min(settings.limit, RECOMMENDATION_LIMIT)` cells.
///
/// Callers sort by descending priority first; no sorting happens here.
/// Missing pieces degrade instead of failing: an empty hex id becomes
/// `zone_{rank}`, a non-finite center becomes `settings.fallback_center`, an
/// empty boundary becomes an empty polygon, an unscored cell reports
/// `settings.unscored_priority` and an empty table yields empty text.
pub fn generate(
    cells: &[HexCell],
    tables: &PresentationTables,
    settings: &GeneratorSettings,
    picker: &mut dyn OptionPicker,
) -> Vec<Recommendation> {
    let limit = settings.limit.min(RECOMMENDATION_LIMIT);

    cells
        .iter()
        .take(limit)
        .enumerate()
        .map(|(rank, cell)| {
            let zone_id = if cell.hex_id.is_empty() {
                format!("zone_{}", rank)
            } else {
                cell.hex_id.to_string()
            };
            let center = if cell.center.lat.is_finite() && cell.center.lng.is_finite() {
                cell.center
            } else {
                settings.fallback_center
            };

            Recommendation {
                zone_id,
                name: format!("Priority Zone {}", rank + 1),
                center_lat: center.lat,
                center_lng: center.lng,
                radius_km: settings.radius_km,
                priority_score: cell.priority_score.unwrap_or(settings.unscored_priority),
                observation_count: cell.observation_count,
                unique_species: cell.unique_species,
                biodiversity_yield: cell.biodiversity_yield,
                habitat_type: cell.habitat_type.clone(),
                recommended_time: choose(&tables.recommended_times, picker, rank)
                    .cloned()
                    .unwrap_or_default(),
                target_taxa: choose(&tables.target_taxa, picker, rank)
                    .cloned()
                    .unwrap_or_default(),
                rationale: choose(&tables.rationales, picker, rank)
                    .cloned()
                    .unwrap_or_default(),
                geometry: GeoJsonPolygon::from_ring(&cell.boundary),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HexId, DEFAULT_HABITAT_TYPE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cell(id: &str, score: f64) -> HexCell {
        HexCell {
            hex_id: HexId::from(id),
            center: GeoPoint::new(33.0, -117.0),
            boundary: vec![
                GeoPoint::new(33.0, -117.0),
                GeoPoint::new(33.0, -116.9),
                GeoPoint::new(33.1, -116.9),
                GeoPoint::new(33.0, -117.0),
            ],
            observation_count: 3,
            unique_species: 2,
            biodiversity_yield: 2.0 / 3.0,
            habitat_type: DEFAULT_HABITAT_TYPE.to_string(),
            priority_score: Some(score),
        }
    }

    fn cells(n: usize) -> Vec<HexCell> {
        (0..n).map(|i| cell(&format!("hex{}", i), 100.0 - i as f64)).collect()
    }

    #[test]
    fn test_generate_caps_at_ten() {
        let recs = generate(
            &cells(25),
            &PresentationTables::default(),
            &GeneratorSettings::default(),
            &mut RankRotation,
        );
        assert_eq!(recs.len(), RECOMMENDATION_LIMIT);
    }

    #[test]
    fn test_generate_limit_cannot_exceed_cap() {
        let settings = GeneratorSettings {
            limit: 50,
            ..GeneratorSettings::default()
        };
        let recs = generate(&cells(25), &PresentationTables::default(), &settings, &mut RankRotation);
        assert_eq!(recs.len(), RECOMMENDATION_LIMIT);
    }

    #[test]
    fn test_generate_keeps_input_order_and_names() {
        let input = vec![cell("low", 5.0), cell("high", 95.0)];
        let recs = generate(
            &input,
            &PresentationTables::default(),
            &GeneratorSettings::default(),
            &mut RankRotation,
        );

        assert_eq!(recs[0].zone_id, "low");
        assert_eq!(recs[0].name, "Priority Zone 1");
        assert_eq!(recs[1].zone_id, "high");
        assert_eq!(recs[1].name, "Priority Zone 2");
        assert_eq!(recs[1].priority_score, 95.0);
        assert_eq!(recs[0].radius_km, 2.0);
        assert_eq!(recs[0].geometry.exterior()[0], [-117.0, 33.0]);
    }

    #[test]
    fn test_rank_rotation_cycles_tables() {
        let tables = PresentationTables::default();
        let recs = generate(&cells(5), &tables, &GeneratorSettings::default(), &mut RankRotation);

        assert_eq!(recs[0].recommended_time, tables.recommended_times[0]);
        assert_eq!(recs[3].recommended_time, tables.recommended_times[0]);
        assert_eq!(recs[4].target_taxa, tables.target_taxa[0]);
        assert_eq!(recs[2].rationale, tables.rationales[2]);
    }

    #[test]
    fn test_rank_rotation_is_reproducible() {
        let tables = PresentationTables::default();
        let settings = GeneratorSettings::default();
        let a = generate(&cells(8), &tables, &settings, &mut RankRotation);
        let b = generate(&cells(8), &tables, &settings, &mut RankRotation);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_random_picker_is_reproducible_and_in_table() {
        let tables = PresentationTables::default();
        let settings = GeneratorSettings::default();
        let a = generate(&cells(10), &tables, &settings, &mut RandomPicker::new(StdRng::seed_from_u64(7)));
        let b = generate(&cells(10), &tables, &settings, &mut RandomPicker::new(StdRng::seed_from_u64(7)));
        assert_eq!(a, b);
        for rec in &a {
            assert!(tables.recommended_times.contains(&rec.recommended_time));
            assert!(tables.target_taxa.contains(&rec.target_taxa));
            assert!(tables.rationales.contains(&rec.rationale));
        }
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let mut broken = cell("", 40.0);
        broken.center = GeoPoint::new(f64::NAN, -117.0);
        broken.boundary.clear();
        broken.priority_score = None;

        let recs = generate(
            &[cell("ok", 90.0), broken],
            &PresentationTables::default(),
            &GeneratorSettings::default(),
            &mut RankRotation,
        );
        assert_eq!(recs[1].zone_id, "zone_1");
        assert_eq!(recs[1].center_lat, FALLBACK_CENTER.lat);
        assert_eq!(recs[1].center_lng, FALLBACK_CENTER.lng);
        assert!(recs[1].geometry.exterior().is_empty());
        assert_eq!(recs[1].priority_score, UNSCORED_PRIORITY);
    }

    #[test]
    fn test_unscored_cell_uses_configured_placeholder() {
        let mut unscored = cell("a", 0.0);
        unscored.priority_score = None;
        let settings = GeneratorSettings {
            unscored_priority: 12.5,
            ..GeneratorSettings::default()
        };

        let recs = generate(
            &[unscored, cell("b", 0.0)],
            &PresentationTables::default(),
            &settings,
            &mut RankRotation,
        );
        assert_eq!(recs[0].priority_score, 12.5);
        assert_eq!(recs[1].priority_score, 0.0);
    }

    #[test]
    fn test_empty_tables_yield_empty_text() {
        let tables = PresentationTables {
            recommended_times: vec![],
            target_taxa: vec![],
            rationales: vec![],
        };
        assert!(tables.has_empty_table());
        let recs = generate(&cells(1), &tables, &GeneratorSettings::default(), &mut RankRotation);
        assert!(recs[0].recommended_time.is_empty());
        assert!(recs[0].target_taxa.is_empty());
        assert!(recs[0].rationale.is_empty());
    }

    #[test]
    fn test_generate_empty_input() {
        let recs = generate(
            &[],
            &PresentationTables::default(),
            &GeneratorSettings::default(),
            &mut RankRotation,
        );
        assert!(recs.is_empty());
    }
}
