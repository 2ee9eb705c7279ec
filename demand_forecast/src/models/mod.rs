//! Forecasting models for daily demand series
//!
//! Every model shares one contract: read the actual demand values, return an
//! in-sample reconstruction of the same length (the backtest) and a forward
//! forecast of the requested length. Models never fail on short or flat
//! input; they fall back to a flat or zero projection instead.

use crate::config::{Algorithm, ForecastConfig};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod arima;
pub mod exponential_smoothing;
pub mod moving_average;
pub mod seasonal;

pub use arima::ArimaLite;
pub use exponential_smoothing::{HoltLinear, HoltWintersAdditive, SimpleExponentialSmoothing};
pub use moving_average::{MovingAverage, WeightedMovingAverage};
pub use seasonal::WeeklySeasonal;

/// Window length of the moving averages and season length of the seasonal models
pub const WEEK: usize = 7;

/// Backtest and forecast produced by a single model fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Fitted value per historical day, `None` where the model has no estimate
    backtest: Vec<Option<f64>>,
    /// Projected demand per future day, never negative
    forecast: Vec<f64>,
}

impl ModelOutput {
    /// Create a new model output, flooring every forecast value at zero
    pub fn new(backtest: Vec<Option<f64>>, forecast: Vec<f64>) -> Self {
        let forecast = forecast
            .into_iter()
            .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
            .collect();
        Self { backtest, forecast }
    }

    /// Output for a series with no history at all
    pub fn empty(horizon: usize) -> Self {
        Self::new(Vec::new(), vec![0.0; horizon])
    }

    pub fn backtest(&self) -> &[Option<f64>] {
        &self.backtest
    }

    pub fn forecast(&self) -> &[f64] {
        &self.forecast
    }

    /// Number of forecast days
    pub fn horizon(&self) -> usize {
        self.forecast.len()
    }

    /// Total projected demand over the horizon
    pub fn forecast_total(&self) -> f64 {
        self.forecast.iter().sum()
    }
}

/// Common interface for forecasting models
pub trait ForecastModel: Debug + Send + Sync {
    /// Which registry entry this model implements
    fn algorithm(&self) -> Algorithm;

    /// Fit the model to `actuals` and project `horizon` days ahead
    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput;

    /// Get the name of the model
    fn name(&self) -> &str {
        self.algorithm().label()
    }
}

/// Registry entry describing a selectable algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub algorithm: Algorithm,
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<Algorithm> for ModelDescriptor {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            id: algorithm.id(),
            label: algorithm.label(),
            description: algorithm.description(),
        }
    }
}

/// All selectable algorithms in display order
pub fn registry() -> Vec<ModelDescriptor> {
    Algorithm::ALL.into_iter().map(ModelDescriptor::from).collect()
}

/// Build the model selected by `config`.
///
/// Fails only when the configuration carries smoothing constants outside
/// the unit interval.
pub fn build(config: &ForecastConfig) -> Result<Box<dyn ForecastModel>> {
    let params = config.smoothing;
    let model: Box<dyn ForecastModel> = match config.algorithm {
        Algorithm::MovingAverage => Box::new(MovingAverage::new(WEEK)?),
        Algorithm::WeightedMovingAverage => Box::new(WeightedMovingAverage::new(WEEK)?),
        Algorithm::SimpleExponentialSmoothing => {
            Box::new(SimpleExponentialSmoothing::new(params.alpha)?)
        }
        Algorithm::Holt => Box::new(HoltLinear::new(params.alpha, params.beta)?),
        Algorithm::HoltWinters => Box::new(HoltWintersAdditive::new(params, WEEK)?),
        Algorithm::Arima => Box::new(ArimaLite::new(config.arima_band)),
        Algorithm::WeeklySeasonal => Box::new(WeeklySeasonal::new(WEEK)),
    };
    Ok(model)
}
