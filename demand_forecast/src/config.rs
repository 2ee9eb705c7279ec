//! Forecast run configuration
//!
//! Every knob exposed to the dashboard is an enumerated value. Raw numbers
//! and ids coming from the caller are validated through `TryFrom`/`FromStr`
//! so an unsupported window, horizon or algorithm never reaches the engine.

use crate::error::{ForecastError, Result};
use demand_math::SmoothingParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of the history used to fit a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TrainingWindow {
    Days30,
    Days60,
    Days90,
    Days120,
}

impl TrainingWindow {
    pub const ALL: [TrainingWindow; 4] = [
        TrainingWindow::Days30,
        TrainingWindow::Days60,
        TrainingWindow::Days90,
        TrainingWindow::Days120,
    ];

    pub fn days(self) -> u32 {
        match self {
            TrainingWindow::Days30 => 30,
            TrainingWindow::Days60 => 60,
            TrainingWindow::Days90 => 90,
            TrainingWindow::Days120 => 120,
        }
    }
}

impl TryFrom<u32> for TrainingWindow {
    type Error = ForecastError;

    fn try_from(days: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.days() == days)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Training window must be one of 30, 60, 90 or 120 days, got {}",
                    days
                ))
            })
    }
}

impl From<TrainingWindow> for u32 {
    fn from(window: TrainingWindow) -> Self {
        window.days()
    }
}

/// Number of future days to forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Horizon {
    Days7,
    Days14,
    Days30,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Days7, Horizon::Days14, Horizon::Days30];

    pub fn days(self) -> u32 {
        match self {
            Horizon::Days7 => 7,
            Horizon::Days14 => 14,
            Horizon::Days30 => 30,
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = ForecastError;

    fn try_from(days: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|h| h.days() == days)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Horizon must be one of 7, 14 or 30 days, got {}",
                    days
                ))
            })
    }
}

impl From<Horizon> for u32 {
    fn from(horizon: Horizon) -> Self {
        horizon.days()
    }
}

/// The selectable forecasting algorithms, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "MA")]
    MovingAverage,
    #[serde(rename = "WMA")]
    WeightedMovingAverage,
    #[serde(rename = "SES")]
    SimpleExponentialSmoothing,
    #[serde(rename = "HOLT")]
    Holt,
    #[serde(rename = "HW")]
    HoltWinters,
    #[serde(rename = "ARIMA")]
    Arima,
    #[serde(rename = "SEASONAL")]
    WeeklySeasonal,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::MovingAverage,
        Algorithm::WeightedMovingAverage,
        Algorithm::SimpleExponentialSmoothing,
        Algorithm::Holt,
        Algorithm::HoltWinters,
        Algorithm::Arima,
        Algorithm::WeeklySeasonal,
    ];

    /// Short identifier used in configuration and reports
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::MovingAverage => "MA",
            Algorithm::WeightedMovingAverage => "WMA",
            Algorithm::SimpleExponentialSmoothing => "SES",
            Algorithm::Holt => "HOLT",
            Algorithm::HoltWinters => "HW",
            Algorithm::Arima => "ARIMA",
            Algorithm::WeeklySeasonal => "SEASONAL",
        }
    }

    /// Human-readable name for selection lists
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::MovingAverage => "Moving Average (7 days)",
            Algorithm::WeightedMovingAverage => "Weighted Moving Average (7 days)",
            Algorithm::SimpleExponentialSmoothing => "Simple Exponential Smoothing",
            Algorithm::Holt => "Holt Linear Trend",
            Algorithm::HoltWinters => "Holt-Winters (weekly)",
            Algorithm::Arima => "ARIMA (lite)",
            Algorithm::WeeklySeasonal => "Weekly Seasonal Trend",
        }
    }

    /// One-line explanation shown next to the label
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::MovingAverage => "Flat projection of the mean demand over the last week.",
            Algorithm::WeightedMovingAverage => {
                "Last week's demand with recent days weighted more heavily."
            }
            Algorithm::SimpleExponentialSmoothing => {
                "Exponentially decaying average of all history; no trend."
            }
            Algorithm::Holt => "Level plus linear trend, both smoothed exponentially.",
            Algorithm::HoltWinters => "Level, trend and a 7-day additive seasonal pattern.",
            Algorithm::Arima => "Lightweight autoregression with a fixed noise correction.",
            Algorithm::WeeklySeasonal => "Straight-line trend scaled by day-of-week multipliers.",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Unknown algorithm '{}'. Expected one of: MA | WMA | SES | HOLT | HW | ARIMA | SEASONAL",
                    wanted
                ))
            })
    }
}

/// Which side of the mean the ARIMA-lite forecast is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArimaBand {
    /// Mean plus half a standard deviation
    #[default]
    Upper,
    /// Mean minus half a standard deviation
    Lower,
    /// Sign drawn per fit. Reproducible only when seeded.
    Random { seed: Option<u64> },
}

/// Parameters of one forecast run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub training_window: TrainingWindow,
    pub horizon: Horizon,
    pub algorithm: Algorithm,
    #[serde(default)]
    pub smoothing: SmoothingParams,
    #[serde(default)]
    pub arima_band: ArimaBand,
}

impl ForecastConfig {
    /// Create a configuration with the fixed smoothing constants
    pub fn new(training_window: TrainingWindow, horizon: Horizon, algorithm: Algorithm) -> Self {
        Self {
            training_window,
            horizon,
            algorithm,
            smoothing: SmoothingParams::DEFAULT,
            arima_band: ArimaBand::default(),
        }
    }

    /// Validate raw caller input into a configuration
    pub fn from_raw(window_days: u32, horizon_days: u32, algorithm_id: &str) -> Result<Self> {
        Ok(Self::new(
            TrainingWindow::try_from(window_days)?,
            Horizon::try_from(horizon_days)?,
            algorithm_id.parse()?,
        ))
    }

    /// Load a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ForecastConfig = serde_json::from_str(json)?;
        // Re-check constants that may have been overridden in the document
        SmoothingParams::new(
            config.smoothing.alpha,
            config.smoothing.beta,
            config.smoothing.gamma,
        )?;
        Ok(config)
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_arima_band(mut self, band: ArimaBand) -> Self {
        self.arima_band = band;
        self
    }

    pub fn window_days(&self) -> u32 {
        self.training_window.days()
    }

    pub fn horizon_days(&self) -> usize {
        self.horizon.days() as usize
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::new(TrainingWindow::Days90, Horizon::Days14, Algorithm::MovingAverage)
    }
}
