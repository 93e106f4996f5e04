//! Weekday/hour timing windows ranked by how many distinct species each slot
//! turns up per observation.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Timelike};

use crate::models::{biodiversity_yield, Observation};
use crate::routes::strategy::TimingWindow;

/// Default number of windows returned (three days by three hours).
pub const DEFAULT_TIMING_LIMIT: usize = 9;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Group timed observations by `(weekday, hour)` and rank the slots.
///
/// `efficiency_score = clamp(100 * unique / count, 0, 100)`. Observations
/// without a time of day are skipped. Ties keep Monday-first, hour-ascending
/// order.
pub fn timing_windows<'a, I>(observations: I, limit: usize) -> Vec<TimingWindow>
where
    I: IntoIterator<Item = &'a Observation>,
{
    // Keyed by Monday-based day index so iteration is calendar ordered.
    let mut slots: BTreeMap<(u32, u32), (u32, HashSet<&'a str>)> = BTreeMap::new();

    for obs in observations {
        let Some(time) = obs.observed_at else {
            continue;
        };
        let key = (obs.observed_on.weekday().num_days_from_monday(), time.hour());
        let slot = slots.entry(key).or_default();
        slot.0 += 1;
        slot.1.insert(obs.species_name.as_str());
    }

    let mut windows: Vec<TimingWindow> = slots
        .into_iter()
        .map(|((day, hour), (count, species))| {
            let unique = species.len() as u32;
            TimingWindow {
                day_of_week: DAY_NAMES[day as usize % 7].to_string(),
                hour,
                observation_count: count,
                unique_species: unique,
                efficiency_score: (biodiversity_yield(unique, count) * 100.0).clamp(0.0, 100.0),
            }
        })
        .collect();

    windows.sort_by(|a, b| b.efficiency_score.total_cmp(&a.efficiency_score));
    windows.truncate(limit);
    windows
}
