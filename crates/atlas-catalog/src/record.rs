//! Raw pattern records
//!
//! [`PatternRecord`] is the input schema the loader deserializes each raw
//! record into. It carries no guarantees; converting it into a
//! [`Pattern`](crate::Pattern) runs validation.

use crate::error::Result;
use crate::id::PatternId;
use crate::pattern::{Pattern, SourceMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unvalidated pattern input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    /// Identifier to keep (present when rehydrating from storage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PatternId>,

    /// Pattern name
    pub name: String,

    /// Pattern category
    pub category: String,

    /// Brief statement of the pattern's purpose
    pub intent: String,

    /// Problem the pattern addresses
    pub problem: String,

    /// Situations where the pattern applies
    #[serde(default)]
    pub context: String,

    /// How the pattern solves the problem
    pub solution: String,

    /// Trade-offs and results
    #[serde(default)]
    pub consequences: String,

    /// Names of related patterns
    #[serde(default)]
    pub related_patterns: Vec<String>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Source information
    pub source_metadata: SourceMetadata,

    /// Creation timestamp to keep (present when rehydrating from storage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PatternRecord {
    /// Create a record with the required fields
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        intent: impl Into<String>,
        problem: impl Into<String>,
        solution: impl Into<String>,
        source_metadata: SourceMetadata,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            intent: intent.into(),
            problem: problem.into(),
            context: String::new(),
            solution: solution.into(),
            consequences: String::new(),
            related_patterns: Vec::new(),
            tags: Vec::new(),
            source_metadata,
            created_at: None,
        }
    }

    /// Keep a specific identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<PatternId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the related pattern names
    #[must_use]
    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_patterns = related.into_iter().map(Into::into).collect();
        self
    }

    /// Set the applicability context
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the consequences
    #[must_use]
    pub fn with_consequences(mut self, consequences: impl Into<String>) -> Self {
        self.consequences = consequences.into();
        self
    }

    /// Validate into a [`Pattern`]
    pub fn into_pattern(self) -> Result<Pattern> {
        Pattern::try_from(self)
    }
}
