//! Error types for likelihood fitting and resampling
//!
//! Provides a unified error type for all cgrowth crates. Parameter values
//! outside a model's domain are not errors: they evaluate to a negative
//! infinite log-likelihood and never reach this type.

use thiserror::Error;

/// Core error type for estimation and resampling operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input data (empty samples, mismatched lengths, bad quantiles)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The minimizer stopped without converging
    #[error("Convergence failed after {iterations} iterations: {message}")]
    Convergence { message: String, iterations: usize },

    /// IO error (for table export)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(context: &str) -> Self {
        Self::InvalidInput(format!("{context} requires a non-empty sample"))
    }

    /// Create an error for an out-of-range percentile
    pub fn invalid_quantile(q: f64) -> Self {
        Self::InvalidInput(format!("Percentile {q} must be in [0, 100]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Whether this error came from the minimizer
    pub fn is_convergence(&self) -> bool {
        matches!(self, Self::Convergence { .. })
    }
}
