//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading working-time
//! rules from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::RulesConfig;

/// Loads and provides access to the working-time rules.
///
/// # Example
///
/// ```no_run
/// use timekeeping_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/working_time.yaml").unwrap();
/// println!("Minimum rest: {}h", loader.rules().rest.minimum_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: RulesConfig,
}

impl ConfigLoader {
    /// Loads the rules from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or inconsistent limits (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<RulesConfig>(path)?;
        Self::validate(&config, &path.display().to_string())?;

        info!(path = %path.display(), "Loaded working-time rules");
        Ok(Self { config })
    }

    /// Parses rules from an in-memory YAML document.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let config: RulesConfig =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config, "<inline>")?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &RulesConfig, path: &str) -> EngineResult<()> {
        let invalid = |message: &str| {
            Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: message.to_string(),
            })
        };

        if config.daily.soft_ceiling_hours > config.daily.hard_ceiling_hours {
            return invalid("daily soft ceiling exceeds the hard ceiling");
        }
        if config.breaks.threshold_minutes < 0 || config.breaks.minimum_minutes < 0 {
            return invalid("break minutes must not be negative");
        }
        if config.compensatory_rest.sunday_window_days < 1
            || config.compensatory_rest.holiday_window_days < 1
        {
            return invalid("compensatory rest windows must be at least one day");
        }
        Ok(())
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &RulesConfig {
        &self.config
    }

    /// Consumes the loader and returns the rules.
    pub fn into_rules(self) -> RulesConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/working_time.yaml"
    }

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.rules(), &RulesConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/working_time.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("working_time.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_yaml_str_overrides_rest() {
        let loader = ConfigLoader::from_yaml_str("rest:\n  minimum_hours: 12\n").unwrap();
        assert_eq!(loader.rules().rest.minimum_hours, Decimal::from(12));
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = ConfigLoader::from_yaml_str("daily: [not, a, map]");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_soft_ceiling_above_hard_ceiling_rejected() {
        let yaml = "daily:\n  soft_ceiling_hours: 11\n  hard_ceiling_hours: 10\n";
        match ConfigLoader::from_yaml_str(yaml) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("soft ceiling"));
            }
            _ => panic!("Expected ConfigParseError"),
        }
    }

    #[test]
    fn test_zero_day_window_rejected() {
        let yaml = "compensatory_rest:\n  sunday_window_days: 0\n";
        assert!(ConfigLoader::from_yaml_str(yaml).is_err());
    }
}
