//! Dashboard configuration
//!
//! Settings come from defaults, an optional JSON file and finally the
//! `QD_FABRICATION_DELAY` / `QD_RNG_SEED` environment variables.

use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use qd_data::{MockFabricator, DEFAULT_FABRICATION_DELAY};

use crate::error::ConfigError;

pub const DELAY_ENV: &str = "QD_FABRICATION_DELAY";
pub const SEED_ENV: &str = "QD_RNG_SEED";

/// Example queries offered before the user types anything
pub const DEFAULT_SUGGESTIONS: [&str; 6] = [
    "Show monthly sales trend for Q1 2024",
    "Compare revenue by region for last 6 months",
    "What are the top 5 performing products?",
    "Show customer demographics by age group",
    "Display sales distribution by category",
    "Analyze year-over-year growth rate",
];

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Simulated backend latency in milliseconds
    pub fabrication_delay_ms: u64,

    /// Example queries
    pub suggestions: Vec<String>,

    /// Fixed seed for generated values
    pub rng_seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            fabrication_delay_ms: u64::try_from(DEFAULT_FABRICATION_DELAY.as_millis()).unwrap_or(u64::MAX),
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            rng_seed: None,
        }
    }
}

impl DashboardConfig {
    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(
            std::env::var(DELAY_ENV).ok().as_deref(),
            std::env::var(SEED_ENV).ok().as_deref(),
        )
    }

    /// Apply raw override values, e.g. `"250ms"` and `"42"`
    pub fn with_overrides(mut self, delay: Option<&str>, seed: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = delay {
            let parsed = humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::Env {
                var: DELAY_ENV,
                reason: e.to_string(),
            })?;
            self.fabrication_delay_ms = u64::try_from(parsed.as_millis()).map_err(|_| ConfigError::Env {
                var: DELAY_ENV,
                reason: format!("{} is too long", raw.trim()),
            })?;
        }

        if let Some(raw) = seed {
            let parsed = raw.trim().parse::<u64>().map_err(|e| ConfigError::Env {
                var: SEED_ENV,
                reason: e.to_string(),
            })?;
            self.rng_seed = Some(parsed);
        }

        Ok(self)
    }

    pub fn fabrication_delay(&self) -> Duration {
        Duration::from_millis(self.fabrication_delay_ms)
    }

    /// Build the mock fabricator these settings describe
    pub fn mock_fabricator(&self) -> MockFabricator {
        match self.rng_seed {
            Some(seed) => MockFabricator::with_seed(self.fabrication_delay(), seed),
            None => MockFabricator::new(self.fabrication_delay()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.fabrication_delay(), Duration::from_millis(1500));
        assert_eq!(config.suggestions.len(), 6);
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fabrication_delay_ms": 10, "rng_seed": 5 }}"#).unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.fabrication_delay_ms, 10);
        assert_eq!(config.rng_seed, Some(5));
        assert_eq!(config.suggestions, DashboardConfig::default().suggestions);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = DashboardConfig::from_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(DashboardConfig::from_file(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::default()
            .with_overrides(Some("250ms"), Some(" 42 "))
            .unwrap();
        assert_eq!(config.fabrication_delay(), Duration::from_millis(250));
        assert_eq!(config.rng_seed, Some(42));

        let bad = DashboardConfig::default().with_overrides(Some("soon"), None);
        assert!(matches!(bad, Err(ConfigError::Env { var: DELAY_ENV, .. })));

        let bad = DashboardConfig::default().with_overrides(Some("600000000years"), None);
        assert!(matches!(bad, Err(ConfigError::Env { var: DELAY_ENV, .. })));

        let bad = DashboardConfig::default().with_overrides(None, Some("-1"));
        assert!(matches!(bad, Err(ConfigError::Env { var: SEED_ENV, .. })));
    }
}
