//! In-memory storage

use super::{to_records, PatternStorage};
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use std::sync::{Arc, Mutex, MutexGuard};

/// Keeps saved records in memory; useful for tests and ephemeral catalogs
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<Option<Vec<serde_json::Value>>>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-filled with raw records
    pub fn with_records(records: Vec<serde_json::Value>) -> Self {
        Self {
            records: Mutex::new(Some(records)),
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, Option<Vec<serde_json::Value>>>> {
        self.records
            .lock()
            .map_err(|_| Error::Storage("memory storage lock poisoned".to_string()))
    }
}

impl PatternStorage for MemoryStorage {
    fn save(&self, patterns: &[Arc<Pattern>]) -> Result<()> {
        let records = to_records(patterns)?;
        *self.records()? = Some(records);
        Ok(())
    }

    fn load(&self) -> Result<Vec<serde_json::Value>> {
        Ok(self.records()?.clone().unwrap_or_default())
    }

    fn exists(&self) -> bool {
        self.records().map(|r| r.is_some()).unwrap_or(false)
    }

    fn clear(&self) -> Result<()> {
        *self.records()? = None;
        Ok(())
    }
}
