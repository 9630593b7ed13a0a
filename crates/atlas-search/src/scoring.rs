//! Weighted keyword scoring.
//!
//! Every query token is checked against each searchable field of a pattern:
//!
//! | Field | Weight |
//! |-------|--------|
//! | name | 5.0 |
//! | tags | 4.0 |
//! | intent | 3.0 |
//! | category | 2.5 |
//! | problem | 2.0 |
//! | solution | 1.5 |
//!
//! A token equal to a whitespace-separated word of the field scores
//! [`EXACT_MATCH_SCORE`]; otherwise a token contained anywhere in the field
//! scores [`PARTIAL_MATCH_SCORE`]. Only one of the two counts per token and
//! field. The field score is multiplied by the field weight.

use atlas_catalog::Pattern;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Score for a whole-word match
pub const EXACT_MATCH_SCORE: f64 = 1.0;

/// Score for a substring match
pub const PARTIAL_MATCH_SCORE: f64 = 0.5;

/// Pattern fields that take part in scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Pattern name
    Name,
    /// Tags, joined by spaces
    Tags,
    /// Intent
    Intent,
    /// Category
    Category,
    /// Problem
    Problem,
    /// Solution
    Solution,
}

impl SearchField {
    /// All scored fields
    pub const ALL: [SearchField; 6] = [
        Self::Name,
        Self::Tags,
        Self::Intent,
        Self::Category,
        Self::Problem,
        Self::Solution,
    ];

    /// Field name as shown to callers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Tags => "tags",
            Self::Intent => "intent",
            Self::Category => "category",
            Self::Problem => "problem",
            Self::Solution => "solution",
        }
    }

    fn text<'p>(&self, pattern: &'p Pattern) -> Cow<'p, str> {
        match self {
            Self::Name => Cow::Borrowed(pattern.name()),
            Self::Tags => Cow::Owned(pattern.tags().join(" ")),
            Self::Intent => Cow::Borrowed(pattern.intent()),
            Self::Category => Cow::Borrowed(pattern.category()),
            Self::Problem => Cow::Borrowed(pattern.problem()),
            Self::Solution => Cow::Borrowed(pattern.solution()),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiplier applied to each field's match score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    /// Weight for name matches
    pub name: f64,
    /// Weight for tag matches
    pub tags: f64,
    /// Weight for intent matches
    pub intent: f64,
    /// Weight for category matches
    pub category: f64,
    /// Weight for problem matches
    pub problem: f64,
    /// Weight for solution matches
    pub solution: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 5.0,
            tags: 4.0,
            intent: 3.0,
            category: 2.5,
            problem: 2.0,
            solution: 1.5,
        }
    }
}

impl FieldWeights {
    /// Weight of one field
    pub fn weight(&self, field: SearchField) -> f64 {
        match field {
            SearchField::Name => self.name,
            SearchField::Tags => self.tags,
            SearchField::Intent => self.intent,
            SearchField::Category => self.category,
            SearchField::Problem => self.problem,
            SearchField::Solution => self.solution,
        }
    }
}

/// Split a query into lowercase tokens
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Unweighted score of one field's text against the tokens
pub fn score_text(text: &str, tokens: &[String]) -> f64 {
    let text = text.to_lowercase();
    if text.is_empty() {
        return 0.0;
    }
    let words: HashSet<&str> = text.split_whitespace().collect();

    tokens
        .iter()
        .map(|token| {
            if words.contains(token.as_str()) {
                EXACT_MATCH_SCORE
            } else if text.contains(token.as_str()) {
                PARTIAL_MATCH_SCORE
            } else {
                0.0
            }
        })
        .sum()
}

/// Weighted score of a pattern and the fields that contributed to it
pub fn score_pattern(
    pattern: &Pattern,
    tokens: &[String],
    weights: &FieldWeights,
) -> (f64, BTreeSet<SearchField>) {
    let mut total = 0.0;
    let mut matched = BTreeSet::new();

    for field in SearchField::ALL {
        let field_score = score_text(&field.text(pattern), tokens) * weights.weight(field);
        if field_score > 0.0 {
            total += field_score;
            matched.insert(field);
        }
    }

    (total, matched)
}
