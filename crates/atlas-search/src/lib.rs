//! Atlas Search - Weighted Keyword Search
//!
//! This crate ranks catalog patterns against free-text queries:
//! - `SearchEngine`: filters and scores patterns from a `PatternRepository`
//! - `SearchQuery`: query text, category and tag filters, result limit
//! - `SearchResult`: pattern, score, and the fields that matched
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SearchQuery { text, category?, tags[], limit? }            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SearchEngine                                               │
//! │  ├─ category filter (exact)  ├─ tag filter (any)            │
//! │  └─ weighted field scoring (name 5.0 … solution 1.5)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SearchResult: [(pattern, score, matched_fields), ...]      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod query;
pub mod scoring;

pub use engine::{SearchConfig, SearchEngine, SearchResult, SearchStats, DEFAULT_LIMIT};
pub use error::{Error, Result};
pub use query::SearchQuery;
pub use scoring::{FieldWeights, SearchField};
