#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveTime};

use cnc_rust::models::{Observation, ObservationId};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Balboa Park, San Diego.
pub const BALBOA_PARK: (f64, f64) = (32.7341, -117.1446);

pub fn observation(id: i64, species: &str, lat: f64, lng: f64) -> Observation {
    Observation {
        id: ObservationId::new(id),
        species_name: species.to_string(),
        taxon_group: "Birds".to_string(),
        latitude: lat,
        longitude: lng,
        observed_on: NaiveDate::from_ymd_opt(2025, 4, 26).unwrap(),
        observed_at: NaiveTime::from_hms_opt(8, 0, 0),
        user_id: None,
    }
}

/// `count` observations at one point, alternating between `species`.
pub fn cluster(start_id: i64, at: (f64, f64), count: usize, species: &[&str]) -> Vec<Observation> {
    (0..count)
        .map(|i| observation(start_id + i as i64, species[i % species.len()], at.0, at.1))
        .collect()
}

/// One observation per point, spaced far enough apart that no two share a cell.
pub fn scattered(count: usize) -> Vec<Observation> {
    (0..count)
        .map(|i| observation(i as i64, "Zenaida macroura", 20.0 + i as f64 * 1.5, -110.0))
        .collect()
}
