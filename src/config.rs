//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/toolbox/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. It controls where usage data lives and
//! which category `toolbox list` shows when none is given.
//!
//! ## File Location
//!
//! ```text
//! ~/.config/toolbox/config.json
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::catalog::CategoryFilter;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory for favorites/recent files. `None` uses the platform data
    /// directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Category filter applied by `list` when `--category` is not given.
    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_category() -> String {
    "all".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_category: default_category(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            warn!("Using default configuration: {:#}", e);
            Self::default()
        })
    }

    /// Try to load configuration, returning an error on failure.
    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save to the default config location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Update one setting by name. An empty `data_dir` resets it to the
    /// platform default.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => {
                let value = value.trim();
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "default_category" => {
                let filter: CategoryFilter = value.trim().parse()?;
                self.default_category = filter.to_string();
            }
            other => bail!(
                "Unknown config key: {} (expected data_dir or default_category)",
                other
            ),
        }
        Ok(())
    }

    /// The configured default category, falling back to `all` when the stored
    /// value is not a known category.
    pub fn category_filter(&self) -> CategoryFilter {
        self.default_category.parse().unwrap_or_else(|_| {
            warn!(
                "Unknown default_category '{}' in config, showing all",
                self.default_category
            );
            CategoryFilter::All
        })
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "toolbox")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, None);
        assert_eq!(config.default_category, "all");
        assert_eq!(config.category_filter(), CategoryFilter::All);
    }

    #[test]
    fn test_deserialize_missing_fields_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_to_load_from_roundtrip() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("subdir").join("config.json");

        let config = Config {
            data_dir: Some(temp_dir.path().join("data")),
            default_category: "developer".to_string(),
        };

        config.save_to(&config_path).expect("save_to");
        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.category_filter(),
            CategoryFilter::Only(Category::Developer)
        );
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("does_not_exist.json");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_unknown_default_category_falls_back() {
        let config = Config {
            data_dir: None,
            default_category: "games".to_string(),
        };
        assert_eq!(config.category_filter(), CategoryFilter::All);
    }

    #[test]
    fn test_set_then_save_roundtrip() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.json");

        let mut config = Config::default();
        config.set("default_category", "web").expect("set category");
        config
            .set("data_dir", "/tmp/toolbox-data")
            .expect("set data dir");
        config.save_to(&config_path).expect("save_to");

        let loaded = Config::load_from(&config_path).expect("load_from");
        assert_eq!(loaded.default_category, "web");
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/tmp/toolbox-data")));
        assert_eq!(loaded.category_filter(), CategoryFilter::Only(Category::Web));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("default_category", "games").is_err());
        assert!(config.set("theme", "Nord").is_err());
        assert_eq!(config, Config::default());

        config.set("data_dir", "/x").expect("set data dir");
        config.set("data_dir", "  ").expect("reset data dir");
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_deny_unknown_fields() {
        let json = r#"{"default_category": "text", "theme": "Nord"}"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err(), "should reject unknown fields");
    }
}
