//! Moving average calculation implementations
//!
//! Contains implementations of the windowed averages used on demand series:
//! - Simple Moving Average (SMA)
//! - Linearly Weighted Moving Average (WMA), newest value weighted highest

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Simple Moving Average (SMA) implementation
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<f64>,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
        })
    }

    /// Update the SMA with a new value
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);

        // Remove oldest value if we have more than period values
        if self.values.len() > self.period {
            self.values.pop_front();
        }
    }

    /// Get the current SMA value
    pub fn value(&self) -> Result<f64> {
        if self.values.len() < self.period {
            return Err(MathError::InsufficientData(format!(
                "Not enough data for SMA calculation. Need {} values, have {}.",
                self.period,
                self.values.len()
            )));
        }

        Ok(self.values.iter().sum::<f64>() / self.period as f64)
    }
}

/// Linearly Weighted Moving Average (WMA) implementation
///
/// Over a window of `period` values the oldest value has weight 1 and the
/// newest has weight `period`, so a window of 7 divides by 28.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage {
    period: usize,
    values: VecDeque<f64>,
}

impl WeightedMovingAverage {
    /// Create a new Weighted Moving Average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
        })
    }

    /// Update the WMA with a new value
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > self.period {
            self.values.pop_front();
        }
    }

    /// Get the current WMA value
    pub fn value(&self) -> Result<f64> {
        if self.values.len() < self.period {
            return Err(MathError::InsufficientData(format!(
                "Not enough data for WMA calculation. Need {} values, have {}.",
                self.period,
                self.values.len()
            )));
        }

        Ok(linear_weighted_mean(self.values.iter().copied()).unwrap_or(0.0))
    }
}

/// Weighted mean with weights `1, 2, ..., len` applied oldest to newest.
///
/// Returns `None` for an empty input.
pub fn linear_weighted_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut weighted = 0.0;
    let mut weights = 0.0;
    for (idx, value) in values.into_iter().enumerate() {
        let weight = (idx + 1) as f64;
        weighted += value * weight;
        weights += weight;
    }

    if weights == 0.0 {
        None
    } else {
        Some(weighted / weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_calculation() {
        let mut sma = SimpleMovingAverage::new(3).unwrap();

        // Not enough data yet
        assert!(sma.value().is_err());

        sma.update(2.0);
        sma.update(4.0);
        assert!(sma.value().is_err());

        sma.update(6.0);
        assert_eq!(sma.value().unwrap(), 4.0);

        // The window slides, dropping the oldest value
        sma.update(8.0);
        assert_eq!(sma.value().unwrap(), 6.0);
    }

    #[test]
    fn test_sma_rejects_zero_period() {
        assert!(SimpleMovingAverage::new(0).is_err());
        assert!(WeightedMovingAverage::new(0).is_err());
    }

    #[test]
    fn test_wma_weights_newest_highest() {
        let mut wma = WeightedMovingAverage::new(7).unwrap();
        for value in [0.0, 0.0, 0.0, 0.0, 0.0, 0.0] {
            wma.update(value);
        }
        assert!(wma.value().is_err());

        wma.update(28.0);
        // Only the newest value contributes: 28 * 7 / 28
        assert_relative_eq!(wma.value().unwrap(), 7.0);
    }

    #[test]
    fn test_wma_constant_window() {
        let mut wma = WeightedMovingAverage::new(7).unwrap();
        for _ in 0..10 {
            wma.update(5.0);
        }
        assert_relative_eq!(wma.value().unwrap(), 5.0);
    }

    #[test]
    fn test_linear_weighted_mean() {
        assert_eq!(linear_weighted_mean(Vec::new()), None);
        // (1*1 + 2*2 + 3*3) / 6
        assert_relative_eq!(linear_weighted_mean(vec![1.0, 2.0, 3.0]).unwrap(), 14.0 / 6.0);
    }

    #[test]
    fn test_sma_is_exact_after_a_large_value_leaves_the_window() {
        let mut sma = SimpleMovingAverage::new(2).unwrap();
        sma.update(1e16);
        sma.update(1.0);
        sma.update(1.0);
        assert_eq!(sma.value().unwrap(), 1.0);
    }
}
