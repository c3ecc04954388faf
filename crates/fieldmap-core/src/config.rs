use crate::error::{FieldmapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Region set loaded when no path is given.
pub const DEFAULT_MAP_PATH: &str = "map.geojson";

/// Soft limit on comment length.
pub const DEFAULT_COMMENT_LIMIT: usize = 500;

/// Mean Earth radius used by the local distance approximation.
pub const DEFAULT_EARTH_RADIUS_KM: f64 = 6371.0;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Fieldmap
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub map_path: ConfigValue<PathBuf>,
    pub comment_limit: ConfigValue<usize>,
    pub earth_radius_km: ConfigValue<f64>,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            map_path: ConfigValue::new(PathBuf::from(DEFAULT_MAP_PATH), ConfigSource::Default),
            comment_limit: ConfigValue::new(DEFAULT_COMMENT_LIMIT, ConfigSource::Default),
            earth_radius_km: ConfigValue::new(DEFAULT_EARTH_RADIUS_KM, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| FieldmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| FieldmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(map_path) = file_config.map_path {
            self.map_path.update(map_path, ConfigSource::File);
        }

        if let Some(comment_limit) = file_config.comment_limit {
            self.comment_limit.update(comment_limit, ConfigSource::File);
        }

        if let Some(radius) = file_config.earth_radius_km {
            self.earth_radius_km.update(check_earth_radius(radius)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file layer only if the file exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!("No config file at {}", path.as_ref().display());
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // FIELDMAP_MAP
        if let Ok(map_path) = env::var("FIELDMAP_MAP") {
            if map_path.trim().is_empty() {
                tracing::warn!("Ignoring empty FIELDMAP_MAP");
            } else {
                self.map_path.update(PathBuf::from(map_path), ConfigSource::Environment);
            }
        }

        // FIELDMAP_COMMENT_LIMIT
        if let Ok(limit_str) = env::var("FIELDMAP_COMMENT_LIMIT") {
            match limit_str.parse::<usize>() {
                Ok(limit) => self.comment_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FIELDMAP_COMMENT_LIMIT value '{}': expected a non-negative integer",
                    limit_str
                ),
            }
        }

        // FIELDMAP_EARTH_RADIUS_KM
        if let Ok(radius_str) = env::var("FIELDMAP_EARTH_RADIUS_KM") {
            match parse_earth_radius(&radius_str) {
                Ok(radius) => self.earth_radius_km.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid FIELDMAP_EARTH_RADIUS_KM value '{}': expected a positive number",
                    radius_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(map_path) = overrides.map_path {
            self.map_path.update(map_path, ConfigSource::Cli);
        }

        if let Some(comment_limit) = overrides.comment_limit {
            self.comment_limit.update(comment_limit, ConfigSource::Cli);
        }

        if let Some(radius) = overrides.earth_radius_km {
            self.earth_radius_km.update(radius, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "map_path".to_string(),
            (self.map_path.value.display().to_string(), self.map_path.source),
        );

        map.insert(
            "comment_limit".to_string(),
            (self.comment_limit.value.to_string(), self.comment_limit.source),
        );

        map.insert(
            "earth_radius_km".to_string(),
            (self.earth_radius_km.value.to_string(), self.earth_radius_km.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    map_path: Option<PathBuf>,
    comment_limit: Option<usize>,
    earth_radius_km: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub map_path: Option<PathBuf>,
    pub comment_limit: Option<usize>,
    pub earth_radius_km: Option<f64>,
}

/// Parse an Earth radius in kilometers
pub fn parse_earth_radius(s: &str) -> Result<f64> {
    let radius = s.trim().parse::<f64>().map_err(|_| invalid_radius(s))?;
    check_earth_radius(radius)
}

fn check_earth_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(invalid_radius(&radius.to_string()))
    }
}

fn invalid_radius(value: &str) -> FieldmapError {
    FieldmapError::ConfigInvalid {
        key: "earth_radius_km".to_string(),
        reason: format!("Invalid Earth radius: {}. Use a positive number of kilometers", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.map_path.value, PathBuf::from("map.geojson"));
        assert_eq!(config.map_path.source, ConfigSource::Default);
        assert_eq!(config.comment_limit.value, 500);
        assert_eq!(config.earth_radius_km.value, 6371.0);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
map_path = "survey/regions.geojson"
comment_limit = 280
earth_radius_km = 6378.137
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.map_path.value, PathBuf::from("survey/regions.geojson"));
        assert_eq!(config.map_path.source, ConfigSource::File);
        assert_eq!(config.comment_limit.value, 280);
        assert_eq!(config.earth_radius_km.value, 6378.137);
    }

    #[test]
    fn test_file_rejects_bad_radius() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "earth_radius_km = -1.0").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(FieldmapError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_optional_file_missing() {
        let config = LayeredConfig::with_defaults()
            .load_from_optional_file("/nonexistent/fieldmap.toml")
            .unwrap();
        assert_eq!(config.map_path.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            map_path: Some(PathBuf::from("other.geojson")),
            comment_limit: None,
            earth_radius_km: None,
        });

        assert_eq!(config.map_path.value, PathBuf::from("other.geojson"));
        assert_eq!(config.map_path.source, ConfigSource::Cli);
        assert_eq!(config.comment_limit.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_earth_radius() {
        assert_eq!(parse_earth_radius("6371").unwrap(), 6371.0);
        assert!(parse_earth_radius("0").is_err());
        assert!(parse_earth_radius("NaN").is_err());
        assert!(parse_earth_radius("far").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("map_path"));
        assert!(map.contains_key("comment_limit"));
        assert!(map.contains_key("earth_radius_km"));

        let (limit, source) = &map["comment_limit"];
        assert_eq!(limit, "500");
        assert_eq!(*source, ConfigSource::Default);
    }
}
