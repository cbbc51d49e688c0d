//! Error types for payload loading and mutation.

use super::models::Payload;
use super::path::PathError;
use thiserror::Error;

/// Errors raised while applying a single mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The operation token is not one of the six known operations.
    #[error("Modification type does not exist: {0}")]
    UnknownOperation(String),

    /// A tabular row did not have exactly three fields.
    #[error("Mutation row must have exactly 3 fields (locator, operation, argument), got {0}")]
    InvalidRow(usize),

    /// The locator could not be parsed as a path expression.
    #[error("Invalid locator '{locator}': {source}")]
    InvalidLocator {
        locator: String,
        #[source]
        source: PathError,
    },

    /// The locator addresses a node that does not exist.
    #[error("Path not found in payload: {0}")]
    PathNotFound(String),

    /// The locator addresses a node that is not a string.
    #[error("Value at '{0}' is not a string")]
    NotAString(String),

    /// A REPLACE argument without the `->` separator.
    #[error("Replacement must have the form 'needle->replacement', got '{0}'")]
    InvalidReplacement(String),
}

/// Errors raised while loading a named resource.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File does not exist: {0}")]
    NotFound(String),

    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource was loaded as `json` but is neither strict nor relaxed JSON.
    #[error("Failed to parse {name} as JSON: {message}")]
    InvalidJson { name: String, message: String },

    #[error("Unknown payload kind '{0}', expected 'string' or 'json'")]
    UnknownKind(String),
}

/// A mutation sequence stopped at a failing step.
///
/// Specs before `index` remain applied to `partial`; nothing is rolled back.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct MutationFailure {
    /// Zero-based index of the failing spec
    pub index: usize,

    /// Payload with specs `0..index` applied
    pub partial: Payload,

    #[source]
    pub error: MutationError,
}

impl MutationFailure {
    pub fn new(index: usize, partial: Payload, error: MutationError) -> Self {
        Self {
            index,
            partial,
            error,
        }
    }
}
