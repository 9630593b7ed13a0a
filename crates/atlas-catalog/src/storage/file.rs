//! JSON file storage

use super::{json_kind, to_records, PatternStorage};
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Stores the catalog as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::Storage("storage path cannot be empty".to_string()));
        }
        debug!(path = ?path, "JSON file storage initialized");
        Ok(Self { path })
    }

    /// Path of the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!(
                    "failed to create storage directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }
}

impl PatternStorage for JsonFileStorage {
    fn save(&self, patterns: &[Arc<Pattern>]) -> Result<()> {
        self.ensure_parent_dir()?;

        let records = to_records(patterns)?;
        let content = serde_json::to_string_pretty(&records)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        // Write to a sibling file, then rename over the target
        let temp_path = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::Storage(format!("failed to write patterns: {e}")));
        }
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::Storage(format!("failed to save patterns: {e}"))
        })?;

        info!(path = ?self.path, count = patterns.len(), "Saved patterns");
        Ok(())
    }

    fn load(&self) -> Result<Vec<serde_json::Value>> {
        if !self.exists() {
            info!(path = ?self.path, "Storage file does not exist, nothing to load");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let document: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            Error::Storage(format!(
                "storage file is corrupted or contains invalid JSON: {e}"
            ))
        })?;

        match document {
            serde_json::Value::Array(records) => {
                info!(path = ?self.path, count = records.len(), "Loaded stored records");
                Ok(records)
            }
            other => Err(Error::Storage(format!(
                "storage file contains invalid data: expected array, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn clear(&self) -> Result<()> {
        if self.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| Error::Storage(format!("failed to clear storage: {e}")))?;
            info!(path = ?self.path, "Cleared storage");
        }
        Ok(())
    }
}
