//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use anyhow::{Context, Result};
use atlas_search::SearchConfig;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Data directory, falling back to the platform default
    pub fn data_dir(&self) -> PathBuf {
        match self.data_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => atlas_catalog::default_data_dir(),
        }
    }

    /// Seed catalog path
    pub fn patterns_path(&self) -> PathBuf {
        self.resolve(&self.catalog.patterns_file)
    }

    /// Persisted catalog path
    pub fn store_path(&self) -> PathBuf {
        self.resolve(&self.catalog.store_file)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir().join(path)
        }
    }
}

/// Catalog file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub patterns_file: PathBuf,
    pub store_file: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            patterns_file: PathBuf::from("patterns.json"),
            store_file: PathBuf::from("catalog.json"),
        }
    }
}

/// Load configuration from files and environment
pub fn load_config(extra: Option<&Path>) -> Result<AppConfig> {
    let mut builder = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name("config/local").required(false));

    if let Some(path) = extra {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        // 3. Environment variables (highest priority)
        // ATLAS_SEARCH__DEFAULT_LIMIT, not ATLAS__SEARCH__DEFAULT_LIMIT
        .add_source(
            Environment::with_prefix("ATLAS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let config: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    config
        .search
        .validate()
        .context("Invalid search configuration")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.catalog.store_file, PathBuf::from("catalog.json"));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_relative_paths_resolve_against_data_dir() {
        let config = AppConfig {
            data_dir: Some("/tmp/atlas-test".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.patterns_path(),
            PathBuf::from("/tmp/atlas-test/patterns.json")
        );
        assert_eq!(
            config.store_path(),
            PathBuf::from("/tmp/atlas-test/catalog.json")
        );
    }

    #[test]
    fn test_absolute_paths_kept() {
        let mut config = AppConfig::default();
        config.catalog.store_file = PathBuf::from("/srv/atlas/store.json");

        assert_eq!(config.store_path(), PathBuf::from("/srv/atlas/store.json"));
    }

    #[test]
    fn test_blank_data_dir_uses_default() {
        let config = AppConfig {
            data_dir: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(config.data_dir(), atlas_catalog::default_data_dir());
    }
}
