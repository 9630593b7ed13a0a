//! Pattern repository with identifier, name, and category indexes.
//!
//! The repository is the only owner of catalog patterns. It is populated by
//! the [`PatternLoader`](crate::PatternLoader) and read by the search engine.
//!
//! # Overview
//!
//! The [`PatternRepository`] provides:
//!
//! - **Fast lookup**: O(1) access by ID or case-insensitive name
//! - **Category index**: patterns per category, in insertion order
//! - **Uniqueness**: no two patterns share an ID or a case-insensitive name
//!
//! Mutation (`add`, `clear`) takes `&mut self`, so readers can never observe
//! a half-updated set of indexes.
//!
//! # Example
//!
//! ```ignore
//! use atlas_catalog::{PatternRepository, PatternRecord, SourceMetadata};
//!
//! let mut repository = PatternRepository::new();
//! let pattern = PatternRecord::new(
//!     "Split Up God Class",
//!     "Redistribute Responsibilities",
//!     "Split a class with too many responsibilities",
//!     "One class monopolizes control",
//!     "Incrementally move behaviour out",
//!     SourceMetadata::new("OORP"),
//! )
//! .into_pattern()?;
//! repository.add(pattern)?;
//!
//! let pattern = repository.get_by_name("split up god class");
//! let in_category = repository.list_by_category("Redistribute Responsibilities");
//! ```

use crate::error::{Error, Result};
use crate::id::PatternId;
use crate::pattern::{name_key, Pattern};
use crate::storage::PatternStorage;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// In-memory pattern repository
#[derive(Debug, Default)]
pub struct PatternRepository {
    /// Patterns indexed by ID
    patterns_by_id: HashMap<PatternId, Arc<Pattern>>,
    /// Lowercased, trimmed name to ID
    names: HashMap<String, PatternId>,
    /// Category to IDs, in insertion order
    categories: HashMap<String, Vec<PatternId>>,
}

/// Snapshot of repository contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    /// Total number of patterns
    pub total_patterns: usize,
    /// Number of distinct categories
    pub total_categories: usize,
    /// Pattern count per category
    pub categories: BTreeMap<String, usize>,
}

impl PatternRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern
    ///
    /// Fails with [`Error::DuplicateId`] or [`Error::DuplicateName`] without
    /// touching any index.
    pub fn add(&mut self, pattern: Pattern) -> Result<Arc<Pattern>> {
        let id = pattern.id().clone();
        if self.patterns_by_id.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }

        let key = pattern.name_key();
        if let Some(existing) = self.names.get(&key) {
            return Err(Error::DuplicateName {
                name: pattern.name().to_string(),
                existing: existing.clone(),
            });
        }

        let pattern = Arc::new(pattern);
        self.names.insert(key, id.clone());
        self.categories
            .entry(pattern.category().to_string())
            .or_default()
            .push(id.clone());
        self.patterns_by_id.insert(id.clone(), Arc::clone(&pattern));

        debug!("Added pattern: {} ({})", pattern.name(), id);
        Ok(pattern)
    }

    /// Get a pattern by ID
    pub fn get_by_id(&self, id: impl AsRef<str>) -> Option<Arc<Pattern>> {
        self.patterns_by_id.get(id.as_ref()).cloned()
    }

    /// Get a pattern by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Option<Arc<Pattern>> {
        self.names
            .get(&name_key(name))
            .and_then(|id| self.patterns_by_id.get(id))
            .cloned()
    }

    /// Look a pattern up by exact ID, falling back to its name
    pub fn get_by_id_or_name(&self, key: &str) -> Option<Arc<Pattern>> {
        self.get_by_id(key.trim())
            .or_else(|| self.get_by_name(key))
    }

    /// All patterns, sorted by name
    pub fn list_all(&self) -> Vec<Arc<Pattern>> {
        let mut patterns: Vec<_> = self.patterns_by_id.values().cloned().collect();
        patterns.sort_by(|a, b| compare_names(a, b));
        patterns
    }

    /// Patterns in a category, in insertion order
    ///
    /// Unknown categories yield an empty list.
    pub fn list_by_category(&self, category: &str) -> Vec<Arc<Pattern>> {
        self.categories
            .get(category)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.patterns_by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Pattern count per category, ordered by category
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        self.categories
            .iter()
            .map(|(category, ids)| (category.clone(), ids.len()))
            .collect()
    }

    /// Number of patterns
    pub fn count(&self) -> usize {
        self.patterns_by_id.len()
    }

    /// Whether the repository holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns_by_id.is_empty()
    }

    /// Remove every pattern and reset all indexes
    pub fn clear(&mut self) {
        self.patterns_by_id.clear();
        self.names.clear();
        self.categories.clear();

        info!("Cleared pattern repository");
    }

    /// Repository statistics
    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            total_patterns: self.count(),
            total_categories: self.categories.len(),
            categories: self.category_counts(),
        }
    }

    /// Persist every pattern through a storage backend
    pub fn save_to(&self, storage: &dyn PatternStorage) -> Result<usize> {
        let patterns = self.list_all();
        storage.save(&patterns)?;
        info!("Saved {} patterns to storage", patterns.len());
        Ok(patterns.len())
    }
}

fn compare_names(a: &Pattern, b: &Pattern) -> std::cmp::Ordering {
    a.name_key()
        .cmp(&b.name_key())
        .then_with(|| a.name().cmp(b.name()))
}
