//! Error types for atlas-search

use thiserror::Error;

/// Error type for search operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A search argument was out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, Error>;
