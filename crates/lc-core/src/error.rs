//! Error types for lightcurve analysis
//!
//! Provides a unified error type for all lightcurve-stats crates.

use thiserror::Error;

/// Core error type for lightcurve operations
#[derive(Error, Debug)]
pub enum Error {
    /// Two parallel arrays that must have equal length do not
    #[error("Shape error in {context}: lengths {left} and {right} differ")]
    Shape {
        context: String,
        left: usize,
        right: usize,
    },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for two arrays of differing length
    pub fn shape(context: &str, left: usize, right: usize) -> Self {
        Self::Shape {
            context: context.to_string(),
            left,
            right,
        }
    }

    /// Create an error for a zero bin size
    pub fn zero_binsize(context: &str) -> Self {
        Self::InvalidParameter(format!("{context}: binsize must be at least 1"))
    }

    /// Create an error for a fraction outside of [0, 1]
    pub fn invalid_fraction(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} {value} must be in [0, 1]"))
    }
}
