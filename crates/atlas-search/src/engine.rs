//! Search engine for ranking catalog patterns against a query.
//!
//! # Overview
//!
//! The [`SearchEngine`] borrows a [`PatternRepository`] and never modifies
//! it. A search runs in four steps:
//!
//! 1. Narrow candidates by category (exact match) and tags (any match)
//! 2. Tokenize the query text (lowercase, whitespace-separated)
//! 3. Score every candidate with [`score_pattern`]
//! 4. Sort by score (descending), then name, and truncate to the limit
//!
//! An empty query returns every candidate with score `0.0`. Under a non-empty
//! query, candidates that score `0.0` are left out.
//!
//! # Example
//!
//! ```ignore
//! use atlas_search::{SearchEngine, SearchQuery};
//!
//! let engine = SearchEngine::new(&repository);
//! let results = engine.search(&SearchQuery::new("god class").limit(10))?;
//! for r in &results {
//!     println!("{}: {:.2} ({:?})", r.pattern.name(), r.score, r.matched_fields);
//! }
//! ```

use crate::error::{Error, Result};
use crate::query::SearchQuery;
use crate::scoring::{
    score_pattern, tokenize, FieldWeights, SearchField, EXACT_MATCH_SCORE, PARTIAL_MATCH_SCORE,
};
use atlas_catalog::pattern::normalize_tags;
use atlas_catalog::{Pattern, PatternRepository};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};

/// Default maximum number of results
pub const DEFAULT_LIMIT: usize = 20;

/// A ranked search hit
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched pattern
    pub pattern: Arc<Pattern>,
    /// Relevance score (higher is better, never negative)
    pub score: f64,
    /// Fields that contributed to the score
    pub matched_fields: BTreeSet<SearchField>,
}

/// Configuration for the search engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result limit used when a query sets none
    pub default_limit: usize,
    /// Per-field weights
    pub weights: FieldWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            weights: FieldWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Check that the limit is positive and no weight is negative
    pub fn validate(&self) -> Result<()> {
        validate_limit(self.default_limit)?;
        if let Some(field) = SearchField::ALL
            .into_iter()
            .find(|f| {
                let weight = self.weights.weight(*f);
                weight.is_nan() || weight < 0.0
            })
        {
            return Err(Error::InvalidArgument(format!(
                "weight for '{field}' must be a non-negative number"
            )));
        }
        Ok(())
    }
}

/// Search engine statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStats {
    /// Patterns available to search
    pub total_patterns: usize,
    /// Weights in use
    pub field_weights: FieldWeights,
    /// Score for a whole-word match
    pub exact_match_score: f64,
    /// Score for a substring match
    pub partial_match_score: f64,
}

/// Read-only search over a pattern repository
pub struct SearchEngine<'a> {
    repository: &'a PatternRepository,
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    /// Create an engine with default configuration
    pub fn new(repository: &'a PatternRepository) -> Self {
        Self {
            repository,
            config: SearchConfig::default(),
        }
    }

    /// Create an engine with custom configuration
    pub fn with_config(repository: &'a PatternRepository, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { repository, config })
    }

    /// Engine configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a search
    ///
    /// Fails only when the limit is zero. No matches is an empty list.
    #[instrument(skip_all, fields(query = %query.text))]
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        let limit = query.limit.unwrap_or(self.config.default_limit);
        validate_limit(limit)?;

        let start = Instant::now();
        let candidates = self.candidates(query);
        let tokens = tokenize(&query.text);

        let mut results: Vec<SearchResult> = if tokens.is_empty() {
            candidates
                .into_iter()
                .map(|pattern| SearchResult {
                    pattern,
                    score: 0.0,
                    matched_fields: BTreeSet::new(),
                })
                .collect()
        } else {
            candidates
                .into_iter()
                .filter_map(|pattern| {
                    let (score, matched_fields) =
                        score_pattern(&pattern, &tokens, &self.config.weights);
                    (score > 0.0).then_some(SearchResult {
                        pattern,
                        score,
                        matched_fields,
                    })
                })
                .collect()
        };

        results.sort_by(compare_results);
        let total = results.len();
        results.truncate(limit);

        debug!(
            "Search complete: {} of {} results in {:.2}ms",
            results.len(),
            total,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(results)
    }

    /// Engine statistics
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            total_patterns: self.repository.count(),
            field_weights: self.config.weights,
            exact_match_score: EXACT_MATCH_SCORE,
            partial_match_score: PARTIAL_MATCH_SCORE,
        }
    }

    /// Patterns passing the category and tag filters
    fn candidates(&self, query: &SearchQuery) -> Vec<Arc<Pattern>> {
        let mut patterns = match &query.category {
            Some(category) => self.repository.list_by_category(category),
            None => self.repository.list_all(),
        };
        if let Some(category) = &query.category {
            patterns.retain(|p| p.category() == category.as_str());
        }

        let tags = normalize_tags(&query.tags);
        if !tags.is_empty() {
            patterns.retain(|p| p.tags().iter().any(|t| tags.contains(t)));
        }

        debug!("{} candidate patterns after filters", patterns.len());
        patterns
    }
}

fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::InvalidArgument(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Score descending, then name ascending ignoring case
fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.pattern.name_key().cmp(&b.pattern.name_key()))
        .then_with(|| a.pattern.name().cmp(b.pattern.name()))
}
