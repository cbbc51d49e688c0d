//! Crate-wide error type for callers that mix resolution, loading and mutation.

use crate::config::ConfigError;
use crate::payload::{LoadError, MutationError, MutationFailure};
use crate::placeholder::ResolutionError;
use crate::registry::CaptureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A mutation sequence stopped part way; carries the partial payload.
    #[error(transparent)]
    Mutation(#[from] MutationFailure),

    /// A spec that failed on its own, outside a sequence.
    #[error(transparent)]
    InvalidMutation(#[from] MutationError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
