//! Error types for the demand_forecast crate

use demand_math::MathError;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The upstream event source failed; the run produces no data
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// A configuration value outside the supported set
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed input to a public constructor
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error from the numeric primitives
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from JSON encoding or decoding
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    /// Wrap any displayable transport failure as a fetch error
    pub fn fetch<E: std::fmt::Display>(err: E) -> Self {
        ForecastError::DataFetch(err.to_string())
    }
}
