//! Defines the error type of this crate.

use crate::index::FeatureId;


/// Errors surfaced by training, scoring setup, and model persistence.
///
/// Configuration errors (`EmptyBins`, `DimensionMismatch`, `EmptyIndex`)
/// indicate an integration bug and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum TextBoostError {
    /// Reading or writing a resource failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The customizer JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A feature was given no bins at all.
    #[error("feature {feature} has an empty bin set")]
    EmptyBins {
        /// The offending feature.
        feature: FeatureId,
    },

    /// The bins of a feature are unordered or overlapping.
    #[error("invalid bins: {0}")]
    InvalidBins(String),

    /// The index, distribution, and discretization disagree on a size.
    #[error("{what} mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which dimension disagrees.
        what: &'static str,
        /// The size required by the other components.
        expected: usize,
        /// The size found.
        got: usize,
    },

    /// The index has no documents or no categories.
    #[error("the index has no {0}")]
    EmptyIndex(&'static str),

    /// A persisted model is malformed.
    #[error("invalid model `{name}`: {reason}")]
    InvalidModel {
        /// The model name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}


/// A `Result` alias with [`TextBoostError`].
pub type Result<T> = std::result::Result<T, TextBoostError>;
