//! Exponential smoothing models for daily demand

use crate::config::Algorithm;
use crate::error::Result;
use crate::models::{ForecastModel, ModelOutput};
use demand_math::smoothing::{DoubleExponentialSmoothing, ExponentialSmoothing, HoltWinters};
use demand_math::{stats, SmoothingParams};
use tracing::warn;

/// Simple exponential smoothing model
#[derive(Debug, Clone)]
pub struct SimpleExponentialSmoothing {
    smoother: ExponentialSmoothing,
}

impl SimpleExponentialSmoothing {
    /// Create a new simple exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            smoother: ExponentialSmoothing::new(alpha)?,
        })
    }
}

impl ForecastModel for SimpleExponentialSmoothing {
    fn algorithm(&self) -> Algorithm {
        Algorithm::SimpleExponentialSmoothing
    }

    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput {
        let Some((&first, _)) = actuals.split_first() else {
            return ModelOutput::empty(horizon);
        };

        let mut smoother = self.smoother.clone();
        smoother.seed(first);

        let mut backtest = Vec::with_capacity(actuals.len());
        backtest.push(Some(first));
        for &previous in &actuals[..actuals.len() - 1] {
            // One-step-ahead: fold in yesterday, predict today
            smoother.update(previous);
            backtest.push(smoother.value().ok());
        }

        smoother.update(actuals[actuals.len() - 1]);
        let level = smoother.value().unwrap_or(first);

        ModelOutput::new(backtest, vec![level; horizon])
    }
}

/// Holt's linear trend model (double exponential smoothing)
#[derive(Debug, Clone)]
pub struct HoltLinear {
    smoother: DoubleExponentialSmoothing,
}

impl HoltLinear {
    /// Create a new Holt model
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        Ok(Self {
            smoother: DoubleExponentialSmoothing::new(alpha, beta)?,
        })
    }
}

impl ForecastModel for HoltLinear {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Holt
    }

    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput {
        match actuals {
            [] => return ModelOutput::empty(horizon),
            [only] => {
                return ModelOutput::new(vec![Some(*only)], vec![*only; horizon]);
            }
            _ => {}
        }

        let mut smoother = self.smoother.clone();
        smoother.seed(actuals[0], actuals[1] - actuals[0]);

        let mut backtest = Vec::with_capacity(actuals.len());
        backtest.push(Some(actuals[0]));
        for &value in &actuals[1..] {
            smoother.update(value);
            backtest.push(smoother.forecast(1).ok());
        }

        let forecast = (1..=horizon)
            .map(|h| smoother.forecast(h).unwrap_or(0.0))
            .collect();

        ModelOutput::new(backtest, forecast)
    }
}

/// Additive Holt-Winters model with a fixed season length
#[derive(Debug, Clone)]
pub struct HoltWintersAdditive {
    params: SmoothingParams,
    season_length: usize,
}

impl HoltWintersAdditive {
    /// Create a new additive Holt-Winters model
    pub fn new(params: SmoothingParams, season_length: usize) -> Result<Self> {
        let params = SmoothingParams::new(params.alpha, params.beta, params.gamma)?;
        Ok(Self {
            params,
            season_length: season_length.max(1),
        })
    }

    pub fn season_length(&self) -> usize {
        self.season_length
    }
}

impl ForecastModel for HoltWintersAdditive {
    fn algorithm(&self) -> Algorithm {
        Algorithm::HoltWinters
    }

    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput {
        if actuals.is_empty() {
            return ModelOutput::empty(horizon);
        }

        // Without one full season there is nothing to decompose
        let passthrough: Vec<Option<f64>> = actuals.iter().copied().map(Some).collect();
        if actuals.len() < self.season_length {
            return ModelOutput::new(passthrough, vec![stats::mean(actuals); horizon]);
        }

        let (season, rest) = actuals.split_at(self.season_length);
        let SmoothingParams { alpha, beta, gamma } = self.params;
        let mut hw = match HoltWinters::from_initial_season(alpha, beta, gamma, season) {
            Ok(hw) => hw,
            Err(err) => {
                warn!(%err, "holt-winters initialisation failed, projecting the mean");
                return ModelOutput::new(passthrough, vec![stats::mean(actuals); horizon]);
            }
        };

        let mut backtest = Vec::with_capacity(actuals.len());
        backtest.extend(season.iter().copied().map(Some));
        for &value in rest {
            backtest.push(Some(hw.fitted()));
            hw.update(value);
        }

        let forecast = (1..=horizon).map(|h| hw.forecast(h)).collect();
        ModelOutput::new(backtest, forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ses_recurrence() {
        let model = SimpleExponentialSmoothing::new(0.3).unwrap();
        let output = model.fit(&[10.0, 20.0, 30.0], 2);

        let bt: Vec<f64> = output.backtest().iter().map(|v| v.unwrap()).collect();
        assert_relative_eq!(bt[0], 10.0, epsilon = 1e-9);
        // 0.3 * 10 + 0.7 * 10
        assert_relative_eq!(bt[1], 10.0, epsilon = 1e-9);
        // 0.3 * 20 + 0.7 * 10
        assert_relative_eq!(bt[2], 13.0, epsilon = 1e-9);
        // 0.3 * 30 + 0.7 * 13
        assert_relative_eq!(output.forecast()[0], 18.1, epsilon = 1e-9);
        assert_relative_eq!(output.forecast()[1], 18.1, epsilon = 1e-9);
    }

    #[test]
    fn test_holt_tracks_linear_growth() {
        let actuals: Vec<f64> = (0..10).map(|i| 5.0 + 2.0 * i as f64).collect();
        let output = HoltLinear::new(0.3, 0.2).unwrap().fit(&actuals, 5);

        for (h, value) in output.forecast().iter().enumerate() {
            assert_relative_eq!(*value, 23.0 + 2.0 * (h as f64 + 1.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_holt_single_point_is_flat() {
        let output = HoltLinear::new(0.3, 0.2).unwrap().fit(&[4.0], 3);
        assert_eq!(output.backtest(), &[Some(4.0)]);
        assert_eq!(output.forecast(), &[4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_holt_decline_is_floored() {
        let output = HoltLinear::new(0.3, 0.2)
            .unwrap()
            .fit(&[30.0, 20.0, 10.0, 5.0], 14);
        assert!(output.forecast().iter().all(|&v| v >= 0.0));
        assert_eq!(*output.forecast().last().unwrap(), 0.0);
    }

    #[test]
    fn test_holt_winters_first_season_passes_through() {
        let week = [5.0, 5.0, 5.0, 5.0, 5.0, 12.0, 14.0];
        let actuals: Vec<f64> = (0..21).map(|i| week[i % 7]).collect();
        let model = HoltWintersAdditive::new(SmoothingParams::DEFAULT, 7).unwrap();
        let output = model.fit(&actuals, 7);

        assert_eq!(output.backtest().len(), 21);
        for i in 0..7 {
            assert_eq!(output.backtest()[i], Some(actuals[i]));
        }
        // A perfectly repeating week is reproduced
        for i in 7..21 {
            assert_relative_eq!(output.backtest()[i].unwrap(), actuals[i], epsilon = 1e-9);
        }
        // 21 days consumed, so the forecast starts on slot 0 again
        for (h, value) in output.forecast().iter().enumerate() {
            assert_relative_eq!(*value, actuals[h], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_holt_winters_updates_after_first_season() {
        let actuals = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 10.0, 5.0];
        let model = HoltWintersAdditive::new(SmoothingParams::DEFAULT, 7).unwrap();
        let output = model.fit(&actuals, 1);

        // Fitted before folding in day 7: level 4 + trend 0 + seasonal -3
        assert_relative_eq!(output.backtest()[7].unwrap(), 1.0, epsilon = 1e-9);
        // After day 7: level 6.7, trend 0.54, seasonal[1] still -2
        assert_relative_eq!(output.backtest()[8].unwrap(), 5.24, epsilon = 1e-9);
    }

    #[test]
    fn test_holt_winters_short_series_projects_mean() {
        let model = HoltWintersAdditive::new(SmoothingParams::DEFAULT, 7).unwrap();
        let output = model.fit(&[1.0, 2.0, 3.0], 2);
        assert_eq!(output.backtest(), &[Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(output.forecast(), &[2.0, 2.0]);
    }
}
