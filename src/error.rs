//! Error types for the breeding simulator.

use crate::genetics::Locus;
use thiserror::Error;

/// Result type alias using SimError
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for simulation operations
#[derive(Debug, Error)]
pub enum SimError {
    /// A locus value fell outside `[0, 31]`
    #[error("invalid trait value {value} for {locus} (must be 0..=31)")]
    InvalidTraitValue { locus: Locus, value: u8 },

    /// Sample standard deviation needs at least two samples
    #[error("insufficient samples: got {got}, need at least 2")]
    InsufficientSamples { got: usize },

    /// The safety cap was reached before the finish condition held
    #[error("did not converge after {eggs} eggs ({context})")]
    DidNotConverge { context: String, eggs: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
