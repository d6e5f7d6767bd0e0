//! Error types for empirical distributions
//!
//! Provides a unified error type for all empirical-stats crates.

use thiserror::Error;

/// Core error type for distribution and inference operations
#[derive(Error, Debug)]
pub enum Error {
    /// Operation is mathematically undefined for the current state
    #[error("Domain error: {0}")]
    Domain(String),

    /// Argument outside a required interval
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Hook invoked on a model that does not provide it
    #[error("Unimplemented operation: {0}")]
    Unimplemented(String),

    /// Malformed input data
    #[error("Data error: {0}")]
    Data(String),

    /// Internal consistency broken, usually by skipping normalization
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Errors raised by user-supplied models
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::Data(format!("{operation} requires a non-empty input"))
    }

    /// Create an error for a map whose weights sum to zero
    pub fn zero_total(operation: &str) -> Self {
        Self::Domain(format!("{operation}: total probability is zero"))
    }

    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(p: f64) -> Self {
        Self::OutOfRange(format!("Probability {p} must be in [0, 1]"))
    }

    /// Create an error for a percentage outside [0, 100]
    pub fn invalid_percentage(percentage: f64) -> Self {
        Self::OutOfRange(format!("Percentage {percentage} must be in [0, 100]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::Data(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Data(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a missing model hook
    pub fn unimplemented(hook: &str) -> Self {
        Self::Unimplemented(format!("{hook} is not provided by this model"))
    }

    /// Check that a probability lies in [0, 1]
    pub fn check_probability(p: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Self::invalid_probability(p));
        }
        Ok(())
    }

    /// Check that a percentage lies in [0, 100]
    pub fn check_percentage(percentage: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(Self::invalid_percentage(percentage));
        }
        Ok(())
    }

    /// Map a distribution-constructor error into an invalid parameter
    pub fn parameter<E: std::fmt::Display>(context: &str, err: E) -> Self {
        Self::InvalidParameter(format!("{context}: {err}"))
    }
}
