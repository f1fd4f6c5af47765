//! Error types for the bit-flipping core library

use thiserror::Error;

/// Core error type for environment operations
#[derive(Error, Debug)]
pub enum BitFlipError {
    /// Action index outside `[0, n]`
    #[error("Invalid action: {action} is outside [0, {n}]")]
    InvalidAction {
        /// The rejected action
        action: usize,
        /// Bit-vector length of the environment
        n: usize,
    },

    /// Bit-vector length must be at least one
    #[error("Invalid length: bit vectors need at least one bit, got {0}")]
    InvalidLength(usize),

    /// Step called after the episode already reported `done`
    #[error("Episode finished: call reset before stepping again")]
    EpisodeFinished,

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Render mode other than `human` or `ansi`
    #[error("Unsupported render mode: {0}")]
    UnsupportedRenderMode(String),

    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for environment operations
pub type Result<T> = std::result::Result<T, BitFlipError>;
