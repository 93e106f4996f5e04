//! Analytics configuration file support.
//!
//! Settings are read from TOML. Every field has a default, so an empty file
//! (or no file at all) yields the stock pipeline. A handful of `CNC_*`
//! environment variables override the file for quick experiments.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::gaps::{DEFAULT_GAP_LIMIT, DEFAULT_GAP_THRESHOLD};
use crate::algorithms::recommendations::{
    GeneratorSettings, OptionPicker, PresentationTables, RandomPicker, RankRotation,
    DEFAULT_RADIUS_KM, FALLBACK_CENTER, RECOMMENDATION_LIMIT, UNSCORED_PRIORITY,
};
use crate::algorithms::timing::DEFAULT_TIMING_LIMIT;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{GeoPoint, GridResolution, DEFAULT_HABITAT_TYPE};

pub const ENV_HEX_RESOLUTION: &str = "CNC_HEX_RESOLUTION";
pub const ENV_GAP_THRESHOLD: &str = "CNC_GAP_THRESHOLD";
pub const ENV_GAP_LIMIT: &str = "CNC_GAP_LIMIT";
pub const ENV_RECOMMENDATION_SELECTION: &str = "CNC_RECOMMENDATION_SELECTION";
pub const ENV_RECOMMENDATION_SEED: &str = "CNC_RECOMMENDATION_SEED";

const CONFIG_FILE_NAME: &str = "analytics.toml";

/// Top-level analytics configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub grid: GridSettings,
    pub gaps: GapSettings,
    pub recommendations: RecommendationSettings,
    pub presentation: PresentationSettings,
    pub timing: TimingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Kept as a raw number so [`AnalyticsConfig::validate`] can report it.
    pub resolution: u8,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            resolution: GridResolution::DEFAULT.value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapSettings {
    /// Cells with strictly fewer observations are gaps.
    pub threshold: u32,
    pub limit: usize,
}

impl Default for GapSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_GAP_THRESHOLD,
            limit: DEFAULT_GAP_LIMIT,
        }
    }
}

/// How presentation text is assigned to zones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// `rank % len`; identical input gives identical output.
    #[default]
    Rotating,
    /// Uniform random choice, reproducible when a seed is set.
    Random,
}

impl FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rotating" => Ok(Self::Rotating),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "Unknown selection strategy '{}': expected 'rotating' or 'random'",
                other
            )),
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotating => f.write_str("rotating"),
            Self::Random => f.write_str("random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationSettings {
    pub limit: usize,
    pub radius_km: f64,
    pub fallback_center: GeoPoint,
    pub selection: SelectionStrategy,
    pub seed: Option<u64>,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            limit: RECOMMENDATION_LIMIT,
            radius_km: DEFAULT_RADIUS_KM,
            fallback_center: FALLBACK_CENTER,
            selection: SelectionStrategy::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    pub habitat_type: String,
    /// Placeholder priority shown for hexbins and zones that have not been
    /// scored.
    pub unscored_priority: f64,
    pub recommended_times: Vec<String>,
    pub target_taxa: Vec<Vec<String>>,
    pub rationales: Vec<String>,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        let tables = PresentationTables::default();
        Self {
            habitat_type: DEFAULT_HABITAT_TYPE.to_string(),
            unscored_priority: UNSCORED_PRIORITY,
            recommended_times: tables.recommended_times,
            target_taxa: tables.target_taxa,
            rationales: tables.rationales,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub limit: usize,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TIMING_LIMIT,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalyticsError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AnalyticsResult<Self> {
        toml::from_str(content).map_err(|e| {
            AnalyticsError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `analytics.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> AnalyticsResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Using analytics config");
                return Self::from_file(&path);
            }
        }

        Err(AnalyticsError::configuration(
            "No analytics.toml found in standard locations",
        ))
    }

    /// Apply `CNC_*` environment overrides on top of the loaded values.
    pub fn apply_env_overrides(&mut self) -> AnalyticsResult<()> {
        if let Some(resolution) = env_parse::<u8>(ENV_HEX_RESOLUTION)? {
            self.grid.resolution = resolution;
        }
        if let Some(threshold) = env_parse::<u32>(ENV_GAP_THRESHOLD)? {
            self.gaps.threshold = threshold;
        }
        if let Some(limit) = env_parse::<usize>(ENV_GAP_LIMIT)? {
            self.gaps.limit = limit;
        }
        if let Some(selection) = env_parse::<SelectionStrategy>(ENV_RECOMMENDATION_SELECTION)? {
            self.recommendations.selection = selection;
        }
        if let Some(seed) = env_parse::<u64>(ENV_RECOMMENDATION_SEED)? {
            self.recommendations.seed = Some(seed);
        }
        Ok(())
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> AnalyticsResult<()> {
        self.resolution()?;

        if self.gaps.threshold == 0 {
            return Err(AnalyticsError::configuration(
                "gaps.threshold must be at least 1; 0 can never match a cell",
            ));
        }
        if self.recommendations.limit > RECOMMENDATION_LIMIT {
            return Err(AnalyticsError::configuration(format!(
                "recommendations.limit {} exceeds the maximum of {}",
                self.recommendations.limit, RECOMMENDATION_LIMIT
            )));
        }
        if !(self.recommendations.radius_km.is_finite() && self.recommendations.radius_km > 0.0) {
            return Err(AnalyticsError::configuration(
                "recommendations.radius_km must be a positive number",
            ));
        }
        if !self.recommendations.fallback_center.is_valid() {
            let c = self.recommendations.fallback_center;
            return Err(AnalyticsError::InvalidCoordinate { lat: c.lat, lng: c.lng });
        }
        if !(0.0..=100.0).contains(&self.presentation.unscored_priority) {
            return Err(AnalyticsError::configuration(
                "presentation.unscored_priority must be within 0..=100",
            ));
        }
        if self.tables().has_empty_table() {
            return Err(AnalyticsError::configuration(
                "presentation tables must not be empty",
            ));
        }
        Ok(())
    }

    pub fn resolution(&self) -> AnalyticsResult<GridResolution> {
        GridResolution::new(self.grid.resolution)
    }

    pub fn tables(&self) -> PresentationTables {
        PresentationTables {
            recommended_times: self.presentation.recommended_times.clone(),
            target_taxa: self.presentation.target_taxa.clone(),
            rationales: self.presentation.rationales.clone(),
        }
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            limit: self.recommendations.limit,
            radius_km: self.recommendations.radius_km,
            fallback_center: self.recommendations.fallback_center,
            unscored_priority: self.presentation.unscored_priority,
        }
    }

    /// Build the picker selected by `recommendations.selection`.
    pub fn picker(&self) -> Box<dyn OptionPicker + Send> {
        match self.recommendations.selection {
            SelectionStrategy::Rotating => Box::new(RankRotation),
            SelectionStrategy::Random => {
                let rng = match self.recommendations.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Box::new(RandomPicker::new(rng))
            }
        }
    }
}

fn env_parse<T>(key: &str) -> AnalyticsResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            AnalyticsError::configuration(format!("Invalid value '{}' for {}: {}", raw, key, e))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AnalyticsConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
        assert_eq!(config.grid.resolution, 7);
        assert_eq!(config.gaps.threshold, 5);
        assert_eq!(config.gaps.limit, 20);
        assert_eq!(config.recommendations.limit, 10);
        assert_eq!(config.presentation.unscored_priority, 50.0);
        assert_eq!(config.timing.limit, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[grid]
resolution = 8

[gaps]
threshold = 10

[recommendations]
selection = "random"
seed = 42
fallback_center = { lat = 34.05, lng = -118.25 }

[presentation]
habitat_type = "Chaparral"
rationales = ["Only rationale"]
"#;
        let config = AnalyticsConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.resolution().unwrap().value(), 8);
        assert_eq!(config.gaps.threshold, 10);
        assert_eq!(config.gaps.limit, 20);
        assert_eq!(config.recommendations.selection, SelectionStrategy::Random);
        assert_eq!(config.recommendations.seed, Some(42));
        assert_eq!(config.recommendations.fallback_center.lat, 34.05);
        assert_eq!(config.presentation.habitat_type, "Chaparral");
        assert_eq!(config.tables().rationales, vec!["Only rationale".to_string()]);
        assert_eq!(config.tables().recommended_times.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\nlimit = 4").unwrap();

        let config = AnalyticsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timing.limit, 4);
    }

    #[test]
    fn test_from_file_missing() {
        let err = AnalyticsConfig::from_file("/no/such/analytics.toml").unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AnalyticsConfig::from_toml_str("[grid\nresolution = 7").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_unknown_selection_rejected_at_parse() {
        let toml = "[recommendations]\nselection = \"shuffle\"";
        assert!(AnalyticsConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AnalyticsConfig::default();
        config.grid.resolution = 16;
        assert!(matches!(
            config.validate(),
            Err(AnalyticsError::InvalidResolution { resolution: 16 })
        ));

        let mut config = AnalyticsConfig::default();
        config.gaps.threshold = 0;
        assert!(config.validate().is_err());

        let mut config = AnalyticsConfig::default();
        config.recommendations.limit = 11;
        assert!(config.validate().is_err());

        let mut config = AnalyticsConfig::default();
        config.presentation.target_taxa.clear();
        assert!(config.validate().is_err());

        let mut config = AnalyticsConfig::default();
        config.recommendations.fallback_center = GeoPoint::new(f64::NAN, 0.0);
        assert!(matches!(
            config.validate(),
            Err(AnalyticsError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_selection_strategy_from_str() {
        assert_eq!(
            "Rotating".parse::<SelectionStrategy>().unwrap(),
            SelectionStrategy::Rotating
        );
        assert_eq!(
            " random ".parse::<SelectionStrategy>().unwrap(),
            SelectionStrategy::Random
        );
        assert!("other".parse::<SelectionStrategy>().is_err());
        assert_eq!(SelectionStrategy::Random.to_string(), "random");
    }

    #[test]
    fn test_seeded_picker_is_reproducible() {
        let mut config = AnalyticsConfig::default();
        config.recommendations.selection = SelectionStrategy::Random;
        config.recommendations.seed = Some(9);

        let mut a = config.picker();
        let mut b = config.picker();
        let xs: Vec<usize> = (0..16).map(|i| a.pick(i, 4)).collect();
        let ys: Vec<usize> = (0..16).map(|i| b.pick(i, 4)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 4));
    }

    #[test]
    fn test_generator_settings_carry_unscored_priority() {
        let config = AnalyticsConfig::from_toml_str(
            "[presentation]\nunscored_priority = 30.0\n\n[recommendations]\nlimit = 4",
        )
        .unwrap();
        let settings = config.generator_settings();
        assert_eq!(settings.unscored_priority, 30.0);
        assert_eq!(settings.limit, 4);
        assert_eq!(
            AnalyticsConfig::default().generator_settings().unscored_priority,
            UNSCORED_PRIORITY
        );
    }

    #[test]
    fn test_rotating_picker() {
        let mut picker = AnalyticsConfig::default().picker();
        assert_eq!(picker.pick(5, 3), 2);
    }
}
