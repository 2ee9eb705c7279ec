//! Exponential smoothing implementations for demand series
//!
//! Contains streaming state machines for:
//! - Simple Exponential Smoothing (level only)
//! - Double Exponential Smoothing (Holt's method, level + trend)
//! - Additive Holt-Winters (level + trend + season)

use crate::{check_unit_interval, MathError, Result};

/// Simple Exponential Smoothing implementation
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    level: Option<f64>,
}

impl ExponentialSmoothing {
    /// Create a new Exponential Smoothing with the specified alpha (smoothing factor)
    pub fn new(alpha: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;

        Ok(Self {
            alpha,
            level: None,
        })
    }

    /// Set the level directly instead of taking it from the first value
    pub fn seed(&mut self, level: f64) {
        self.level = Some(level);
    }

    /// Update the Exponential Smoothing with a new value
    pub fn update(&mut self, value: f64) {
        self.level = Some(match self.level {
            None => value,
            Some(current_level) => self.alpha * value + (1.0 - self.alpha) * current_level,
        });
    }

    /// Get the current smoothed value
    pub fn value(&self) -> Result<f64> {
        self.level.ok_or_else(|| {
            MathError::InsufficientData("No data available for exponential smoothing".to_string())
        })
    }
}

/// Double Exponential Smoothing (Holt's Method) implementation
#[derive(Debug, Clone)]
pub struct DoubleExponentialSmoothing {
    alpha: f64,
    beta: f64,
    level: Option<f64>,
    trend: Option<f64>,
}

impl DoubleExponentialSmoothing {
    /// Create a new Double Exponential Smoothing with the specified parameters
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;
        check_unit_interval("Beta", beta)?;

        Ok(Self {
            alpha,
            beta,
            level: None,
            trend: None,
        })
    }

    /// Start from an explicit level and trend
    pub fn seed(&mut self, level: f64, trend: f64) {
        self.level = Some(level);
        self.trend = Some(trend);
    }

    /// Update the Double Exponential Smoothing with a new value
    pub fn update(&mut self, value: f64) {
        match (self.level, self.trend) {
            (Some(prev_level), Some(prev_trend)) => {
                let new_level = self.alpha * value + (1.0 - self.alpha) * (prev_level + prev_trend);
                let new_trend =
                    self.beta * (new_level - prev_level) + (1.0 - self.beta) * prev_trend;

                self.level = Some(new_level);
                self.trend = Some(new_trend);
            }
            _ => {
                // First value, just use it as initial level and zero trend
                self.level = Some(value);
                self.trend = Some(0.0);
            }
        }
    }

    /// Forecast h steps ahead
    pub fn forecast(&self, h: usize) -> Result<f64> {
        match (self.level, self.trend) {
            (Some(level), Some(trend)) => Ok(level + (h as f64) * trend),
            _ => Err(MathError::InsufficientData(
                "Not enough data to make a forecast".to_string(),
            )),
        }
    }
}

/// Additive Holt-Winters (triple exponential smoothing) implementation
///
/// The seasonal slot for observation `t` is `t % season_length`, where `t`
/// counts from the first value of the initial season.
#[derive(Debug, Clone)]
pub struct HoltWinters {
    alpha: f64,
    beta: f64,
    gamma: f64,
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    t: usize,
}

impl HoltWinters {
    /// Initialise from one full season of observations.
    ///
    /// The level starts at the season mean, the trend at zero and each
    /// seasonal index at the observation's deviation from the mean.
    pub fn from_initial_season(alpha: f64, beta: f64, gamma: f64, season: &[f64]) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;
        check_unit_interval("Beta", beta)?;
        check_unit_interval("Gamma", gamma)?;
        if season.is_empty() {
            return Err(MathError::InsufficientData(
                "Holt-Winters needs at least one full season".to_string(),
            ));
        }

        let level = season.iter().sum::<f64>() / season.len() as f64;
        let seasonals = season.iter().map(|value| value - level).collect();

        Ok(Self {
            alpha,
            beta,
            gamma,
            level,
            trend: 0.0,
            seasonals,
            t: season.len(),
        })
    }

    /// One-step-ahead fitted value for the next observation
    pub fn fitted(&self) -> f64 {
        self.level + self.trend + self.seasonals[self.slot(self.t)]
    }

    /// Fold in the next observation
    pub fn update(&mut self, value: f64) {
        let slot = self.slot(self.t);
        let seasonal = self.seasonals[slot];
        let prev_level = self.level;

        self.level = self.alpha * (value - seasonal) + (1.0 - self.alpha) * (prev_level + self.trend);
        self.trend = self.beta * (self.level - prev_level) + (1.0 - self.beta) * self.trend;
        self.seasonals[slot] = self.gamma * (value - self.level) + (1.0 - self.gamma) * seasonal;
        self.t += 1;
    }

    /// Forecast h steps past the last observation (h = 1 is the next step)
    pub fn forecast(&self, h: usize) -> f64 {
        let slot = self.slot(self.t + h.saturating_sub(1));
        self.level + h as f64 * self.trend + self.seasonals[slot]
    }

    fn slot(&self, t: usize) -> usize {
        t % self.seasonals.len()
    }
}
