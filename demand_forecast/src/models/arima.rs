//! ARIMA-lite: a heuristic autoregression for daily demand
//!
//! This is not an estimated ARIMA model. The backtest applies a fixed
//! first-order autoregression around the series mean with a fixed correction
//! for the previous step's error, and the forecast is a flat band half a
//! standard deviation away from the mean.

use crate::config::{Algorithm, ArimaBand};
use crate::models::{ForecastModel, ModelOutput};
use demand_math::stats;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Weight of the previous actual value
const AR_WEIGHT: f64 = 0.5;
/// Weight of the previous step's fitted-minus-actual error
const ERROR_WEIGHT: f64 = 0.3;
/// Offset of the forecast band in standard deviations
const BAND_WIDTH: f64 = 0.5;

/// Heuristic autoregressive model
#[derive(Debug, Clone)]
pub struct ArimaLite {
    band: ArimaBand,
}

impl ArimaLite {
    /// Create a new ARIMA-lite model placing its forecast per `band`
    pub fn new(band: ArimaBand) -> Self {
        Self { band }
    }

    pub fn band(&self) -> ArimaBand {
        self.band
    }

    fn band_sign(&self) -> f64 {
        let upper = match self.band {
            ArimaBand::Upper => true,
            ArimaBand::Lower => false,
            ArimaBand::Random { seed: Some(seed) } => StdRng::seed_from_u64(seed).gen_bool(0.5),
            ArimaBand::Random { seed: None } => rand::thread_rng().gen_bool(0.5),
        };
        if upper {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for ArimaLite {
    fn default() -> Self {
        Self::new(ArimaBand::default())
    }
}

impl ForecastModel for ArimaLite {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Arima
    }

    fn name(&self) -> &str {
        "ARIMA-lite (heuristic AR(1) with error correction)"
    }

    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput {
        if actuals.is_empty() {
            return ModelOutput::empty(horizon);
        }

        let mean = stats::mean(actuals);
        let std_dev = stats::population_std_dev(actuals);

        let mut backtest = Vec::with_capacity(actuals.len());
        let mut previous_fit = actuals[0];
        backtest.push(Some(previous_fit));
        for window in actuals.windows(2) {
            let previous_actual = window[0];
            let fitted = (AR_WEIGHT * previous_actual
                + ERROR_WEIGHT * (previous_fit - previous_actual)
                + mean)
                .max(0.0);
            backtest.push(Some(fitted));
            previous_fit = fitted;
        }

        let level = mean + self.band_sign() * BAND_WIDTH * std_dev;
        ModelOutput::new(backtest, vec![level.max(0.0); horizon])
    }
}
