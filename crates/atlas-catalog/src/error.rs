//! Error types for atlas-catalog

use crate::id::PatternId;
use thiserror::Error;

/// Catalog error type
#[derive(Debug, Error)]
pub enum Error {
    /// A pattern record failed validation
    #[error("validation error: {0}")]
    Validation(String),

    /// A pattern with the same ID is already in the repository
    #[error("pattern with ID '{0}' already exists")]
    DuplicateId(PatternId),

    /// A pattern with the same (case-insensitive) name is already in the repository
    #[error("pattern with name '{name}' already exists (ID: {existing})")]
    DuplicateName {
        /// Name of the rejected pattern
        name: String,
        /// ID of the pattern already holding the name
        existing: PatternId,
    },

    /// Storage backend error
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is a uniqueness violation raised by the repository
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateId(_) | Self::DuplicateName { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
