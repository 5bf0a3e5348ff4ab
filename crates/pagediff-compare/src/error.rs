//! Error types for pagediff-compare

use thiserror::Error;

/// Errors that can occur while comparing bitmaps
#[derive(Debug, Error)]
pub enum CompareError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pagediff_core::Error),

    /// An option value is out of range
    #[error("invalid option {name} = {value}: {reason}")]
    InvalidOption {
        /// Option name as it appears in overrides
        name: &'static str,
        /// Offending value
        value: String,
        /// Accepted range
        reason: &'static str,
    },

    /// Overrides could not be parsed (malformed JSON, wrong type, unknown key)
    #[error("invalid overrides: {0}")]
    InvalidOverrides(String),

    /// The two bitmaps do not have the same size
    #[error("bitmap size mismatch: {}x{} vs {}x{}", .first.0, .first.1, .second.0, .second.1)]
    DimensionMismatch {
        /// Size of the first bitmap
        first: (u32, u32),
        /// Size of the second bitmap
        second: (u32, u32),
    },
}

/// Result type for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;
