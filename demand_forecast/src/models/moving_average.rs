//! Moving average models for daily demand

use crate::config::Algorithm;
use crate::error::Result;
use crate::models::{ForecastModel, ModelOutput};
use demand_math::moving_averages::{self, SimpleMovingAverage, WeightedMovingAverage as Wma};
use demand_math::stats;

/// Simple Moving Average model
///
/// The backtest for day `i` is the mean of the `window` days before it; the
/// forecast repeats the mean of the last `window` days.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    /// Create a new Simple Moving Average model
    pub fn new(window: usize) -> Result<Self> {
        SimpleMovingAverage::new(window)?;
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastModel for MovingAverage {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MovingAverage
    }

    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput {
        if actuals.is_empty() {
            return ModelOutput::empty(horizon);
        }

        let mut sma = match SimpleMovingAverage::new(self.window) {
            Ok(sma) => sma,
            Err(_) => return ModelOutput::empty(horizon),
        };

        let mut backtest = Vec::with_capacity(actuals.len());
        for &value in actuals {
            // Estimate for this day uses only the days before it
            backtest.push(sma.value().ok());
            sma.update(value);
        }

        let level = sma
            .value()
            .unwrap_or_else(|_| stats::mean(actuals));

        ModelOutput::new(backtest, vec![level; horizon])
    }
}

/// Linearly Weighted Moving Average model
///
/// Like [`MovingAverage`] but the newest day in the window carries weight
/// `window` and the oldest weight 1.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage {
    window: usize,
}

impl WeightedMovingAverage {
    /// Create a new Weighted Moving Average model
    pub fn new(window: usize) -> Result<Self> {
        Wma::new(window)?;
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastModel for WeightedMovingAverage {
    fn algorithm(&self) -> Algorithm {
        Algorithm::WeightedMovingAverage
    }

    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput {
        if actuals.is_empty() {
            return ModelOutput::empty(horizon);
        }

        let mut wma = match Wma::new(self.window) {
            Ok(wma) => wma,
            Err(_) => return ModelOutput::empty(horizon),
        };

        let mut backtest = Vec::with_capacity(actuals.len());
        for &value in actuals {
            backtest.push(wma.value().ok());
            wma.update(value);
        }

        let level = wma.value().unwrap_or_else(|_| {
            moving_averages::linear_weighted_mean(actuals.iter().copied()).unwrap_or(0.0)
        });

        ModelOutput::new(backtest, vec![level; horizon])
    }
}
