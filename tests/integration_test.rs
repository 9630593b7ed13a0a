//! Integration tests for Pattern Atlas
//!
//! These tests verify the integration between the crates:
//! - atlas-catalog: Loading, repository indexes, persistence
//! - atlas-search: Ranked search over a loaded catalog

use std::path::PathBuf;

use atlas_catalog::{JsonFileStorage, PatternLoader, PatternRepository, PatternStorage};
use atlas_search::{SearchEngine, SearchField, SearchQuery};
use serde_json::json;
use tempfile::TempDir;

fn seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/patterns.json")
}

fn seeded_repository() -> PatternRepository {
    let mut repository = PatternRepository::new();
    let report = PatternLoader::new(&mut repository)
        .load_from_file(&seed_path())
        .unwrap();
    assert!(report.is_complete(), "seed catalog failed: {:?}", report.failures);
    repository
}

// ============================================================================
// Seed Catalog
// ============================================================================

#[test]
fn test_seed_catalog_loads_cleanly() {
    let repository = seeded_repository();

    assert_eq!(repository.count(), 10);
    let counts = repository.category_counts();
    assert_eq!(counts.get("First Contact"), Some(&3));
    assert_eq!(counts.get("Redistribute Responsibilities"), Some(&2));
    assert_eq!(counts.values().sum::<usize>(), repository.count());
}

#[test]
fn test_seed_catalog_search() {
    let repository = seeded_repository();
    let engine = SearchEngine::new(&repository);

    let results = engine.search(&SearchQuery::new("god class").limit(10)).unwrap();
    assert_eq!(results[0].pattern.name(), "Split Up God Class");
    assert!(results[0].matched_fields.contains(&SearchField::Name));
    assert!(results.iter().all(|r| r.score > 0.0));

    let tests = engine
        .search(&SearchQuery::new("tests").in_category("Tests: Your Life Insurance!"))
        .unwrap();
    assert_eq!(tests.len(), 2);

    let by_tag = engine
        .search(&SearchQuery::default().with_tags(["Reverse-Engineering"]))
        .unwrap();
    let names: Vec<_> = by_tag.iter().map(|r| r.pattern.name()).collect();
    assert_eq!(names, ["Analyze the Persistent Data", "Speculate about Design"]);
}

#[test]
fn test_lookup_by_id_or_name() {
    let repository = seeded_repository();
    let pattern = repository.get_by_name("  interview during demo ").unwrap();

    let by_id = repository
        .get_by_id_or_name(pattern.id().as_str())
        .unwrap();
    assert_eq!(by_id.name(), "Interview During Demo");
    assert!(repository.get_by_id_or_name("Unknown Pattern").is_none());
}

// ============================================================================
// Loader Recovery
// ============================================================================

#[test]
fn test_loader_partial_failure_mixed_input() {
    let mut repository = seeded_repository();
    let before = repository.count();

    let records = vec![
        json!({
            "name": "Tie Code and Questions",
            "category": "Initial Understanding",
            "intent": "Keep questions close to the code",
            "problem": "Questions get lost",
            "solution": "Annotate the code with questions",
            "source_metadata": { "source_name": "OORP" }
        }),
        // Duplicate of a seed pattern, differing only by case
        json!({
            "name": "SPLIT UP GOD CLASS",
            "category": "Redistribute Responsibilities",
            "intent": "x",
            "problem": "x",
            "solution": "x",
            "source_metadata": { "source_name": "OORP" }
        }),
        // Missing required fields
        json!({ "name": "Incomplete" }),
        // Not a record at all
        json!(42),
    ];

    let report = PatternLoader::new(&mut repository).load_records(records);

    assert_eq!(report.attempted, 4);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 3);
    assert_eq!(report.succeeded + report.failed, report.attempted);
    assert_eq!(repository.count(), before + 1);

    let indices: Vec<_> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(indices, [1, 2, 3]);
    assert_eq!(report.failures[1].name.as_deref(), Some("Incomplete"));
    assert!(report.failures[2].name.is_none());
}

#[test]
fn test_reload_reports_every_record_as_duplicate() {
    let mut repository = seeded_repository();

    let report = PatternLoader::new(&mut repository)
        .load_from_file(&seed_path())
        .unwrap();

    assert_eq!(report.attempted, 10);
    assert_eq!(report.succeeded, 0);
    assert_eq!(repository.count(), 10);
}

// ============================================================================
// Persistence Round Trip
// ============================================================================

#[test]
fn test_save_restore_search_round_trip() {
    let dir = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("catalog.json")).unwrap();

    let original = seeded_repository();
    assert_eq!(original.save_to(&storage).unwrap(), 10);
    assert!(storage.exists());

    let mut restored = PatternRepository::new();
    let report = PatternLoader::new(&mut restored)
        .load_from_storage(&storage)
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(restored.stats(), original.stats());

    for pattern in original.list_all() {
        let copy = restored.get_by_id(pattern.id()).unwrap();
        assert_eq!(copy.as_ref(), pattern.as_ref());
    }

    let query = SearchQuery::new("code reading demo");
    let before: Vec<_> = SearchEngine::new(&original)
        .search(&query)
        .unwrap()
        .into_iter()
        .map(|r| (r.pattern.id().clone(), r.score))
        .collect();
    let after: Vec<_> = SearchEngine::new(&restored)
        .search(&query)
        .unwrap()
        .into_iter()
        .map(|r| (r.pattern.id().clone(), r.score))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_results_outlive_clear() {
    let mut repository = seeded_repository();
    let results = SearchEngine::new(&repository)
        .search(&SearchQuery::new("god"))
        .unwrap();

    repository.clear();

    assert!(repository.is_empty());
    assert!(repository.category_counts().is_empty());
    assert_eq!(results[0].pattern.name(), "Split Up God Class");
}
