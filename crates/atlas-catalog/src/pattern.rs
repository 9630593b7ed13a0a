//! Pattern definitions
//!
//! A [`Pattern`] is a validated catalog entry. It can only be produced by
//! validating a [`PatternRecord`](crate::PatternRecord), so every pattern
//! held by a repository satisfies the constraints below:
//!
//! | Field | Constraint |
//! |-------|------------|
//! | `id` | any non-blank string (trimmed); a UUID v4 string when not supplied |
//! | `name` | trimmed, non-empty, at most [`MAX_NAME_LEN`] characters |
//! | `category` | trimmed, non-empty, at most [`MAX_CATEGORY_LEN`] characters |
//! | `intent`, `problem`, `solution` | non-blank |
//! | `tags` | lowercase, trimmed, deduplicated |
//! | `related_patterns` | trimmed, blank entries dropped |
//! | `source_metadata.publication_year` | within [`PUBLICATION_YEARS`] |

use crate::error::{Error, Result};
use crate::id::PatternId;
use crate::record::PatternRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;

/// Maximum pattern name length, in characters
pub const MAX_NAME_LEN: usize = 200;

/// Maximum category length, in characters
pub const MAX_CATEGORY_LEN: usize = 100;

/// Accepted publication years
pub const PUBLICATION_YEARS: RangeInclusive<i32> = 1950..=2100;

/// Where a pattern was published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Name of the pattern source (e.g. "OORP", "GoF")
    pub source_name: String,
    /// Pattern authors
    #[serde(default)]
    pub authors: Vec<String>,
    /// Year of publication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    /// Link to the source material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceMetadata {
    /// Create source metadata with only a source name
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            authors: Vec::new(),
            publication_year: None,
            url: None,
        }
    }

    /// Set the authors
    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the publication year
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.publication_year = Some(year);
        self
    }

    /// Set the source URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    fn validated(self) -> Result<Self> {
        let source_name = self.source_name.trim().to_string();
        if source_name.is_empty() {
            return Err(Error::Validation("source name cannot be empty".to_string()));
        }
        if self.authors.iter().any(|a| a.trim().is_empty()) {
            return Err(Error::Validation(
                "author names cannot be empty strings".to_string(),
            ));
        }
        if let Some(year) = self.publication_year {
            if !PUBLICATION_YEARS.contains(&year) {
                return Err(Error::Validation(format!(
                    "publication year {year} outside {}..={}",
                    PUBLICATION_YEARS.start(),
                    PUBLICATION_YEARS.end()
                )));
            }
        }
        Ok(Self {
            source_name,
            ..self
        })
    }
}

/// A validated catalog pattern
///
/// Immutable once built. Field names in the serialized form match
/// [`PatternRecord`], so a saved pattern can be loaded back as a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    id: PatternId,
    name: String,
    category: String,
    intent: String,
    problem: String,
    context: String,
    solution: String,
    consequences: String,
    related_patterns: Vec<String>,
    tags: Vec<String>,
    source_metadata: SourceMetadata,
    created_at: DateTime<Utc>,
}

impl Pattern {
    /// Unique identifier
    pub fn id(&self) -> &PatternId {
        &self.id
    }

    /// Pattern name (trimmed)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pattern category (trimmed)
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Brief statement of the pattern's purpose
    pub fn intent(&self) -> &str {
        &self.intent
    }

    /// Problem the pattern addresses
    pub fn problem(&self) -> &str {
        &self.problem
    }

    /// Situations where the pattern applies (may be empty)
    pub fn context(&self) -> &str {
        &self.context
    }

    /// How the pattern solves the problem
    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Trade-offs of applying the pattern (may be empty)
    pub fn consequences(&self) -> &str {
        &self.consequences
    }

    /// Names of related patterns, in source order
    pub fn related_patterns(&self) -> &[String] {
        &self.related_patterns
    }

    /// Normalized tags (lowercase, deduplicated)
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Source information
    pub fn source_metadata(&self) -> &SourceMetadata {
        &self.source_metadata
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Key used by the name index: trimmed and lowercased
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    /// Check whether the pattern carries a tag (case-insensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.tags.iter().any(|t| *t == tag)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.category)
    }
}

impl TryFrom<PatternRecord> for Pattern {
    type Error = Error;

    fn try_from(record: PatternRecord) -> Result<Self> {
        let id = match record.id {
            Some(id) => {
                let id = id.as_str().trim();
                if id.is_empty() {
                    return Err(Error::Validation(
                        "pattern id cannot be empty or whitespace only".to_string(),
                    ));
                }
                PatternId::from(id)
            }
            None => PatternId::generate(),
        };

        let name = record.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation(
                "pattern name cannot be empty or whitespace only".to_string(),
            ));
        }
        let name_len = name.chars().count();
        if name_len > MAX_NAME_LEN {
            return Err(Error::Validation(format!(
                "pattern name is {name_len} characters (max {MAX_NAME_LEN})"
            )));
        }

        let category = record.category.trim().to_string();
        if category.is_empty() {
            return Err(Error::Validation(
                "category cannot be empty or whitespace only".to_string(),
            ));
        }
        let category_len = category.chars().count();
        if category_len > MAX_CATEGORY_LEN {
            return Err(Error::Validation(format!(
                "category is {category_len} characters (max {MAX_CATEGORY_LEN})"
            )));
        }

        Ok(Self {
            id,
            intent: required_text("intent", record.intent)?,
            problem: required_text("problem", record.problem)?,
            solution: required_text("solution", record.solution)?,
            context: record.context,
            consequences: record.consequences,
            related_patterns: normalize_related(record.related_patterns),
            tags: normalize_tags(record.tags),
            source_metadata: record.source_metadata.validated()?,
            created_at: record.created_at.unwrap_or_else(Utc::now),
            name,
            category,
        })
    }
}

/// Normalize a pattern name into its index key
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lowercase, trim, and deduplicate tags, keeping first-seen order
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn normalize_related(related: Vec<String>) -> Vec<String> {
    related
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

fn required_text(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}
