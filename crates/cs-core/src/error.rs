//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CsError` as one variant
//! via `#[from]`, so a rejected input surfaces unchanged at every layer.

use thiserror::Error;

use crate::Algorithm;

/// The top-level error type for `cs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CsError {
    #[error("invalid world size {0}: at least one process is required")]
    InvalidWorldSize(i64),

    #[error("invalid vector size {0}: byte count must be non-negative")]
    InvalidVectorSize(i64),

    #[error("unknown variant {0:?}: expected \"bandwidth\" or \"latency\"")]
    UnknownVariant(String),

    #[error("unknown algorithm {0:?}: expected \"swing\", \"recursive_doubling\", or \"ring\"")]
    UnknownAlgorithm(String),

    #[error("algorithm {0} requires a variant (\"bandwidth\" or \"latency\")")]
    MissingVariant(Algorithm),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CsError {
    /// `true` for inputs rejected before any simulation state is created.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CsError::InvalidWorldSize(_)
                | CsError::InvalidVectorSize(_)
                | CsError::UnknownVariant(_)
                | CsError::UnknownAlgorithm(_)
                | CsError::MissingVariant(_)
        )
    }
}

/// Shorthand result type for all `cs-*` crates.
pub type CsResult<T> = Result<T, CsError>;
