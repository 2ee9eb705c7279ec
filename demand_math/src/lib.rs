//! # Demand Math
//!
//! Numeric building blocks for daily demand forecasting.
//! This crate provides streaming implementations of the averaging and
//! smoothing recurrences the forecasting models are built from, plus the
//! summary statistics they share.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod moving_averages;
pub mod smoothing;
pub mod stats;

/// Errors that can occur in demand math calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for demand math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Smoothing constants shared by the exponential smoothing family.
///
/// `alpha` weights the level, `beta` the trend and `gamma` the seasonal
/// component. Each must lie strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl SmoothingParams {
    /// Fixed constants used by the dashboard forecasts.
    pub const DEFAULT: SmoothingParams = SmoothingParams {
        alpha: 0.3,
        beta: 0.2,
        gamma: 0.4,
    };

    /// Create a validated set of smoothing constants
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;
        check_unit_interval("Beta", beta)?;
        check_unit_interval("Gamma", gamma)?;
        Ok(Self { alpha, beta, gamma })
    }
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(MathError::InvalidInput(format!(
            "{} must be between 0 and 1 (exclusive), got {}",
            name, value
        )));
    }
    Ok(())
}
