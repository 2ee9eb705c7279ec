//! Accuracy of a model's backtest against the observed demand

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error measures over the days a backtest can be scored on
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute percentage error, in percent
    pub mape: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Number of days that contributed to the scores
    pub points: usize,
}

impl AccuracyMetrics {
    /// Score `backtest` against `actuals`.
    ///
    /// A day counts only when the model produced an estimate for it and the
    /// actual demand is positive, which keeps the percentage error defined.
    /// With no such day every measure is zero.
    pub fn evaluate(actuals: &[f64], backtest: &[Option<f64>]) -> Self {
        let mut squared = 0.0;
        let mut absolute = 0.0;
        let mut percentage = 0.0;
        let mut points = 0usize;

        for (&actual, estimate) in actuals.iter().zip(backtest) {
            let Some(estimate) = *estimate else {
                continue;
            };
            if actual <= 0.0 {
                continue;
            }
            let error = actual - estimate;
            squared += error * error;
            absolute += error.abs();
            percentage += (error / actual).abs();
            points += 1;
        }

        if points == 0 {
            return Self::default();
        }

        let count = points as f64;
        Self {
            rmse: (squared / count).sqrt(),
            mape: percentage / count * 100.0,
            mae: absolute / count,
            points,
        }
    }

    /// Whether any day was scored
    pub fn is_scored(&self) -> bool {
        self.points > 0
    }
}

impl fmt::Display for AccuracyMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy over {} days:", self.points)?;
        writeln!(f, "  RMSE: {:.2}", self.rmse)?;
        writeln!(f, "  MAE:  {:.2}", self.mae)?;
        write!(f, "  MAPE: {:.1}%", self.mape)
    }
}
