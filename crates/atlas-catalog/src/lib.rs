//! # Atlas Catalog - Pattern Catalog Core
//!
//! This crate holds the catalog side of Pattern Atlas:
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pattern`] | Validated catalog entry |
//! | [`PatternRecord`] | Raw input schema, validated into a [`Pattern`] |
//! | [`PatternRepository`] | In-memory store with ID, name, and category indexes |
//! | [`PatternLoader`] | Batch loading with per-record failure reporting |
//! | [`PatternStorage`] | Persistence boundary ([`JsonFileStorage`], [`MemoryStorage`]) |
//!
//! ## Loading Flow
//!
//! ```text
//! JSON / YAML file, or PatternStorage::load()
//!     │  raw records
//!     ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  PatternLoader                                              │
//! │  • Deserialize into PatternRecord                          │
//! │  • Validate into Pattern                                   │
//! │  • Record failures, keep going                             │
//! └────────────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  PatternRepository                                          │
//! │  • id → pattern, name → id, category → [id]                │
//! │  • Rejects duplicate IDs and names                         │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod id;
pub mod loader;
pub mod pattern;
pub mod record;
pub mod repository;
pub mod storage;

pub use error::{Error, Result};
pub use id::PatternId;
pub use loader::{LoadFailure, LoadReport, PatternLoader, SourceFormat};
pub use pattern::{Pattern, SourceMetadata};
pub use record::PatternRecord;
pub use repository::{PatternRepository, RepositoryStats};
pub use storage::{JsonFileStorage, MemoryStorage, PatternStorage};

/// Get the default data directory
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|p| p.join("atlas"))
        .unwrap_or_else(|| std::path::PathBuf::from(".atlas"))
}
