//! Catalog loader
//!
//! Turns raw records into validated patterns and adds them to a
//! [`PatternRepository`]. A bad record never stops the batch: validation
//! failures, malformed records, and duplicate IDs or names are all recorded in
//! the returned [`LoadReport`] and loading moves on to the next record.
//!
//! Nothing is retried. Loading the same input twice reports every previously
//! loaded record as a duplicate.
//!
//! ## Example
//!
//! ```ignore
//! use atlas_catalog::{PatternLoader, PatternRepository};
//!
//! let mut repository = PatternRepository::new();
//! let report = PatternLoader::new(&mut repository).load_from_file("patterns.json".as_ref())?;
//! println!("{report}");
//! for failure in &report.failures {
//!     eprintln!("skipped {failure}");
//! }
//! ```

mod report;

pub use report::{LoadFailure, LoadReport};

use crate::error::{Error, Result};
use crate::record::PatternRecord;
use crate::repository::PatternRepository;
use crate::storage::{json_kind, PatternStorage};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Input document formats accepted by [`PatternLoader::load_from_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    /// JSON array of records
    #[default]
    Json,
    /// YAML sequence of records
    Yaml,
}

impl SourceFormat {
    /// Detect format from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Detect format from a path, defaulting to JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

/// Populates a repository from raw records
pub struct PatternLoader<'a> {
    repository: &'a mut PatternRepository,
}

impl<'a> PatternLoader<'a> {
    /// Create a loader writing into `repository`
    pub fn new(repository: &'a mut PatternRepository) -> Self {
        Self { repository }
    }

    /// Load a sequence of raw records
    ///
    /// Per-record problems end up in the report; this never fails.
    #[instrument(skip_all)]
    pub fn load_records<I>(&mut self, records: I) -> LoadReport
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        let start = Instant::now();
        let mut report = LoadReport::default();

        for (index, raw) in records.into_iter().enumerate() {
            let name = raw
                .get("name")
                .and_then(|n| n.as_str())
                .map(|n| n.trim().to_string());

            match self.load_one(raw) {
                Ok(loaded) => {
                    debug!("Loaded pattern {}: {}", index, loaded);
                    report.record_success();
                }
                Err(e) => {
                    let failure = LoadFailure {
                        index,
                        name,
                        reason: e.to_string(),
                    };
                    warn!("Failed to load {}", failure);
                    report.record_failure(failure);
                }
            }
        }

        report.duration = start.elapsed();
        info!(
            "Loading complete: {}/{} patterns loaded in {:.2}ms",
            report.succeeded,
            report.attempted,
            report.duration_ms()
        );
        if report.failed > 0 {
            warn!("{} patterns failed to load", report.failed);
        }
        report
    }

    /// Load records from a JSON or YAML file
    ///
    /// A missing or unreadable file, an unparsable document, or a top level
    /// that is not a list is an error; bad records inside the list are not.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_from_file(&mut self, path: &Path) -> Result<LoadReport> {
        let content = std::fs::read_to_string(path)?;
        info!("Loading patterns from: {}", path.display());

        let document: serde_json::Value = match SourceFormat::from_path(path) {
            SourceFormat::Json => serde_json::from_str(&content)
                .map_err(|e| Error::Serialization(format!("invalid JSON: {e}")))?,
            SourceFormat::Yaml => serde_yaml::from_str(&content)
                .map_err(|e| Error::Serialization(format!("invalid YAML: {e}")))?,
        };

        match document {
            serde_json::Value::Array(records) => Ok(self.load_records(records)),
            other => Err(Error::Serialization(format!(
                "expected a list of patterns, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Rehydrate from a storage backend
    pub fn load_from_storage(&mut self, storage: &dyn PatternStorage) -> Result<LoadReport> {
        let records = storage.load()?;
        Ok(self.load_records(records))
    }

    fn load_one(&mut self, raw: serde_json::Value) -> Result<String> {
        let record: PatternRecord = serde_json::from_value(raw)
            .map_err(|e| Error::Validation(format!("malformed record: {e}")))?;
        let pattern = record.into_pattern()?;
        let added = self.repository.add(pattern)?;
        Ok(added.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn raw(name: &str, category: &str) -> serde_json::Value {
        json!({
            "name": name,
            "category": category,
            "intent": "intent",
            "problem": "problem",
            "solution": "solution",
            "tags": ["Reverse-Engineering"],
            "source_metadata": { "source_name": "OORP", "publication_year": 2002 }
        })
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(SourceFormat::from_extension("JSON"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_extension("yml"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_extension("txt"), None);
        assert_eq!(SourceFormat::from_path(Path::new("a/b.yaml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), SourceFormat::Json);
    }

    #[test]
    fn test_load_all_valid() {
        let mut repository = PatternRepository::new();
        let report = PatternLoader::new(&mut repository).load_records(vec![
            raw("Read all the Code in One Hour", "First Contact"),
            raw("Skim the Documentation", "First Contact"),
        ]);

        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded, 2);
        assert!(report.is_complete());
        assert_eq!(repository.count(), 2);
        assert!(repository
            .get_by_name("skim the documentation")
            .unwrap()
            .has_tag("reverse-engineering"));
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let mut repository = PatternRepository::new();
        let mut missing_intent = raw("No Intent", "First Contact");
        missing_intent.as_object_mut().unwrap().remove("intent");

        let report = PatternLoader::new(&mut repository).load_records(vec![
            raw("Interview During Demo", "First Contact"),
            missing_intent,
            json!("not an object"),
            raw("   ", "First Contact"),
            raw("Do a Mock Installation", "First Contact"),
        ]);

        assert_eq!(report.attempted, 5);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 3);
        assert_eq!(repository.count(), 2);

        let indices: Vec<_> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, [1, 2, 3]);
        assert_eq!(report.failures[0].name.as_deref(), Some("No Intent"));
        assert!(report.failures[0].reason.contains("intent"));
        assert_eq!(report.failures[1].name, None);
    }

    #[test]
    fn test_duplicates_within_batch() {
        let mut repository = PatternRepository::new();
        let report = PatternLoader::new(&mut repository).load_records(vec![
            raw("Split Up God Class", "Redistribute Responsibilities"),
            raw("split up god class", "Somewhere Else"),
        ]);

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert!(report.failures[0].reason.contains("already exists"));
        assert!(repository.list_by_category("Somewhere Else").is_empty());
    }

    #[test]
    fn test_duplicate_ids_within_batch() {
        let mut repository = PatternRepository::new();
        let mut first = raw("Interview During Demo", "First Contact");
        first["id"] = json!("TEST-001");
        let mut second = raw("Do a Mock Installation", "First Contact");
        second["id"] = json!("TEST-001");

        let report = PatternLoader::new(&mut repository).load_records(vec![first, second]);

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].name.as_deref(), Some("Do a Mock Installation"));
        assert!(report.failures[0].reason.contains("TEST-001"));
        assert!(report.failures[0].reason.contains("already exists"));

        assert_eq!(repository.count(), 1);
        assert_eq!(repository.get_by_id("TEST-001").unwrap().name(), "Interview During Demo");
        assert!(repository.get_by_name("Do a Mock Installation").is_none());
        assert_eq!(repository.list_by_category("First Contact").len(), 1);
    }

    #[test]
    fn test_load_from_storage() {
        let mut with_id = raw("Learn from the Past", "Detailed Model Capture");
        with_id["id"] = json!("pattern-1");
        let storage = MemoryStorage::with_records(vec![
            with_id,
            raw("Look for the Contracts", "Detailed Model Capture"),
            json!(null),
        ]);

        let mut repository = PatternRepository::new();
        let report = PatternLoader::new(&mut repository)
            .load_from_storage(&storage)
            .unwrap();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failures[0].index, 2);
        assert_eq!(
            repository.get_by_id_or_name("pattern-1").unwrap().name(),
            "Learn from the Past"
        );
    }

    #[test]
    fn test_reload_reports_duplicates() {
        let mut repository = PatternRepository::new();
        let records = vec![
            raw("Eliminate Navigation Code", "Redistribute Responsibilities"),
            raw("Move Behavior Close to Data", "Redistribute Responsibilities"),
        ];

        let first = PatternLoader::new(&mut repository).load_records(records.clone());
        let second = PatternLoader::new(&mut repository).load_records(records);

        assert_eq!(first.succeeded, 2);
        assert_eq!(second.succeeded, 0);
        assert_eq!(second.failed, 2);
        assert_eq!(repository.count(), 2);
    }

    #[test]
    fn test_load_from_file_json_and_yaml() {
        let dir = tempfile::TempDir::new().unwrap();

        let json_path = dir.path().join("patterns.json");
        std::fs::write(
            &json_path,
            serde_json::to_string(&vec![raw("Refactor to Understand", "Detailed Model Capture")]).unwrap(),
        )
        .unwrap();

        let yaml_path = dir.path().join("patterns.yml");
        std::fs::write(
            &yaml_path,
            "- name: Step Through the Execution\n  category: Detailed Model Capture\n  intent: i\n  problem: p\n  solution: s\n  tags: [debugging]\n  source_metadata:\n    source_name: OORP\n",
        )
        .unwrap();

        let mut repository = PatternRepository::new();
        let mut loader = PatternLoader::new(&mut repository);
        assert_eq!(loader.load_from_file(&json_path).unwrap().succeeded, 1);
        assert_eq!(loader.load_from_file(&yaml_path).unwrap().succeeded, 1);

        assert_eq!(repository.list_by_category("Detailed Model Capture").len(), 2);
    }

    #[test]
    fn test_load_from_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut repository = PatternRepository::new();
        let mut loader = PatternLoader::new(&mut repository);

        let missing = loader.load_from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(Error::Io(_))));

        let object_path = dir.path().join("object.json");
        std::fs::write(&object_path, r#"{"patterns": []}"#).unwrap();
        let err = loader.load_from_file(&object_path).unwrap_err();
        assert!(err.to_string().contains("expected a list of patterns"));

        let broken_path = dir.path().join("broken.json");
        std::fs::write(&broken_path, "[{").unwrap();
        assert!(matches!(
            loader.load_from_file(&broken_path),
            Err(Error::Serialization(_))
        ));
    }
}
