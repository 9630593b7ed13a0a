//! Application context
//!
//! Owns the repository and the catalog store for one CLI invocation, and
//! decides where the catalog is loaded from at start-up.

use crate::config::AppConfig;
use anyhow::{bail, Context, Result};
use atlas_catalog::{JsonFileStorage, LoadReport, PatternLoader, PatternRepository, PatternStorage};
use atlas_search::SearchEngine;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Seed catalog compiled into the binary
pub const BUNDLED_PATTERNS: &str = include_str!("../data/patterns.json");

/// Where the catalog was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Persisted store file
    Store(PathBuf),
    /// Configured seed file
    Seed(PathBuf),
    /// Seed catalog compiled into the binary
    Bundled,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(path) => write!(f, "store ({})", path.display()),
            Self::Seed(path) => write!(f, "seed file ({})", path.display()),
            Self::Bundled => write!(f, "bundled catalog"),
        }
    }
}

/// Repository, store, and load state for one run
pub struct AppContext {
    config: AppConfig,
    repository: PatternRepository,
    storage: JsonFileStorage,
    source: CatalogSource,
    load_report: Option<LoadReport>,
}

impl AppContext {
    /// Build the context and load the catalog
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let storage =
            JsonFileStorage::new(config.store_path()).context("Invalid catalog store path")?;
        let mut ctx = Self {
            config,
            repository: PatternRepository::new(),
            storage,
            source: CatalogSource::Bundled,
            load_report: None,
        };
        ctx.load()?;
        Ok(ctx)
    }

    fn load(&mut self) -> Result<()> {
        let seed_path = self.config.patterns_path();
        let mut loader = PatternLoader::new(&mut self.repository);

        let (source, report) = if self.storage.exists() {
            let report = loader
                .load_from_storage(&self.storage)
                .context("Failed to read catalog store")?;
            (CatalogSource::Store(self.storage.path().to_path_buf()), report)
        } else if seed_path.exists() {
            let report = loader
                .load_from_file(&seed_path)
                .with_context(|| format!("Failed to load seed file {}", seed_path.display()))?;
            (CatalogSource::Seed(seed_path), report)
        } else {
            let records: Vec<serde_json::Value> = serde_json::from_str(BUNDLED_PATTERNS)
                .context("Bundled catalog is not a list of patterns")?;
            (CatalogSource::Bundled, loader.load_records(records))
        };

        info!("Catalog loaded from {}: {}", source, report);
        if !report.is_complete() {
            warn!("{} records skipped while loading the catalog", report.failed);
        }

        self.source = source;
        self.load_report = Some(report);
        Ok(())
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loaded catalog
    pub fn repository(&self) -> &PatternRepository {
        &self.repository
    }

    /// Where the catalog came from
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Report of the most recent load
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.load_report.as_ref()
    }

    /// Catalog store
    pub fn storage(&self) -> &JsonFileStorage {
        &self.storage
    }

    /// Search engine over the loaded catalog
    pub fn search_engine(&self) -> Result<SearchEngine<'_>> {
        SearchEngine::with_config(&self.repository, self.config.search.clone())
            .context("Invalid search configuration")
    }

    /// Load patterns from a JSON or YAML file into the catalog and persist it
    pub fn import(&mut self, path: &Path) -> Result<LoadReport> {
        if !path.is_file() {
            bail!("Import file not found: {}", path.display());
        }

        let report = PatternLoader::new(&mut self.repository)
            .load_from_file(path)
            .with_context(|| format!("Failed to import {}", path.display()))?;

        if report.succeeded > 0 {
            self.persist()?;
        }
        self.load_report = Some(report.clone());
        Ok(report)
    }

    /// Write the catalog to the store file
    pub fn persist(&self) -> Result<usize> {
        let saved = self
            .repository
            .save_to(&self.storage)
            .context("Failed to save catalog")?;
        info!("Saved {} patterns to {}", saved, self.storage.path().display());
        Ok(saved)
    }
}
