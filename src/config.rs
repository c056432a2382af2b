use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::grouping::DEFAULT_GROUP_SIZE;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::splits::{DEFAULT_MATRIX_DISTANCES, DEFAULT_MATRIX_ZONES};
use crate::zones::Zone;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Split matrix and output preferences
    #[serde(default)]
    pub display: DisplaySettings,

    /// Training group preferences
    #[serde(default)]
    pub grouping: GroupingSettings,

    /// Logging preferences
    #[serde(default)]
    pub logging: LogConfig,
}

/// Split matrix and output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Interval distances (meters) shown as matrix columns
    pub split_distances: Vec<f64>,

    /// Zones shown as matrix rows
    pub matrix_zones: Vec<Zone>,

    /// Print JSON instead of tables by default
    pub json_output: bool,
}

/// Training group preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSettings {
    /// Target athletes per group
    pub group_size: usize,

    /// Names handed out to groups in order
    pub group_names: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            display: DisplaySettings::default(),
            grouping: GroupingSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            split_distances: DEFAULT_MATRIX_DISTANCES.to_vec(),
            matrix_zones: DEFAULT_MATRIX_ZONES.to_vec(),
            json_output: false,
        }
    }
}

impl Default for GroupingSettings {
    fn default() -> Self {
        GroupingSettings {
            group_size: DEFAULT_GROUP_SIZE,
            group_names: Vec::new(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Keys accepted by [`AppConfig::get`] and [`AppConfig::set`]
    pub const KEYS: [&'static str; 7] = [
        "display.split_distances",
        "display.matrix_zones",
        "display.json_output",
        "grouping.group_size",
        "grouping.group_names",
        "logging.level",
        "logging.format",
    ];

    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vdotrs")
            .join("config.toml")
    }

    /// Load configuration from `path`, falling back to defaults when it is missing or invalid
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(
                    path = %config_path.display(),
                    error = %err,
                    "Using default configuration"
                );
                Self::default()
            }
        }
    }

    /// Read a setting by dotted key, rendered as text
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "display.split_distances" => join(&self.display.split_distances),
            "display.matrix_zones" => join(&self.display.matrix_zones),
            "display.json_output" => self.display.json_output.to_string(),
            "grouping.group_size" => self.grouping.group_size.to_string(),
            "grouping.group_names" => self.grouping.group_names.join(","),
            "logging.level" => self.logging.level.to_filter(),
            "logging.format" => format!("{:?}", self.logging.format).to_lowercase(),
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        };
        Ok(value)
    }

    /// Update a setting by dotted key; list values are comma separated
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "display.split_distances" => {
                self.display.split_distances = split_list(value)
                    .map(|v| {
                        v.parse::<f64>()
                            .ok()
                            .filter(|m| m.is_finite() && *m > 0.0)
                            .ok_or_else(|| anyhow!("Invalid distance: {}", v))
                    })
                    .collect::<Result<_>>()?;
            }
            "display.matrix_zones" => {
                self.display.matrix_zones = split_list(value)
                    .map(|v| v.parse::<Zone>().map_err(anyhow::Error::from))
                    .collect::<Result<_>>()?;
            }
            "display.json_output" => {
                self.display.json_output = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Expected true or false, got {}", value))?;
            }
            "grouping.group_size" => {
                let size: usize = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid group size: {}", value))?;
                if size == 0 {
                    return Err(anyhow!("Group size must be at least 1"));
                }
                self.grouping.group_size = size;
            }
            "grouping.group_names" => {
                self.grouping.group_names = split_list(value).map(str::to_string).collect();
            }
            "logging.level" => {
                self.logging.level = value.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
            }
            "logging.format" => {
                self.logging.format = value.parse::<LogFormat>().map_err(|e| anyhow!(e))?;
            }
            _ => return Err(anyhow!("Unknown configuration key: {}", key)),
        }
        Ok(())
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.grouping.group_size, 5);
        assert_eq!(config.display.split_distances.len(), 7);
        assert_eq!(config.display.matrix_zones[0], Zone::Steady);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.grouping.group_names = vec!["Jedi".to_string(), "Sith".to_string()];
        config.display.matrix_zones = vec![Zone::Threshold, Zone::Race800];
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Lactate Threshold"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[grouping]\ngroup_size = 4\ngroup_names = []\n").unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.grouping.group_size, 4);
        assert_eq!(loaded.display, DisplaySettings::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(Some(&temp_dir.path().join("absent.toml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_get_and_set() {
        let mut config = AppConfig::default();

        config.set("grouping.group_size", "6").unwrap();
        assert_eq!(config.get("grouping.group_size").unwrap(), "6");

        config.set("display.matrix_zones", "CV, 5K").unwrap();
        assert_eq!(config.get("display.matrix_zones").unwrap(), "CV,5K Race");

        config.set("display.split_distances", "400,800").unwrap();
        assert_eq!(config.get("display.split_distances").unwrap(), "400,800");

        config.set("logging.level", "debug").unwrap();
        assert_eq!(config.get("logging.level").unwrap(), "debug");

        config.set("logging.format", "json").unwrap();
        assert_eq!(config.get("logging.format").unwrap(), "json");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = AppConfig::default();
        assert!(config.set("grouping.group_size", "0").is_err());
        assert!(config.set("display.matrix_zones", "Sprint").is_err());
        assert!(config.set("display.split_distances", "-400").is_err());
        assert!(config.set("display.json_output", "maybe").is_err());
        assert!(config.set("nonsense", "1").is_err());
        assert!(config.get("nonsense").is_err());
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = AppConfig::default();
        for key in AppConfig::KEYS {
            assert!(config.get(key).is_ok(), "{}", key);
        }
    }
}
