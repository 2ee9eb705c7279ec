//! Weekly seasonal heuristic: straight-line trend times day-of-week multipliers

use crate::config::Algorithm;
use crate::models::{ForecastModel, ModelOutput};
use demand_math::stats;

/// Linear trend scaled by per-weekday demand multipliers.
///
/// The series is contiguous, so day `i` and day `i + 7` always share a
/// weekday; multipliers are keyed by `i % 7` and never need the calendar.
#[derive(Debug, Clone)]
pub struct WeeklySeasonal {
    period: usize,
}

impl WeeklySeasonal {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Ratio of each weekday slot's mean demand to the overall mean.
    ///
    /// Slots without observations, or a series with zero mean, get 1.
    pub fn multipliers(&self, actuals: &[f64]) -> Vec<f64> {
        let global_mean = stats::mean(actuals);
        stats::slot_means(actuals, self.period)
            .into_iter()
            .map(|slot_mean| match slot_mean {
                Some(m) if global_mean > 0.0 => m / global_mean,
                _ => 1.0,
            })
            .collect()
    }
}

impl Default for WeeklySeasonal {
    fn default() -> Self {
        Self::new(super::WEEK)
    }
}

impl ForecastModel for WeeklySeasonal {
    fn algorithm(&self) -> Algorithm {
        Algorithm::WeeklySeasonal
    }

    fn fit(&self, actuals: &[f64], horizon: usize) -> ModelOutput {
        if actuals.is_empty() {
            return ModelOutput::empty(horizon);
        }

        let n = actuals.len();
        let multipliers = self.multipliers(actuals);
        let level = actuals[0];
        let trend = (actuals[n - 1] - actuals[0]) / n as f64;
        let project = |t: usize| (level + t as f64 * trend) * multipliers[t % self.period];

        let backtest = (0..n).map(|i| Some(project(i))).collect();
        let forecast = (n..n + horizon).map(project).collect();

        ModelOutput::new(backtest, forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_multipliers_follow_weekday_means() {
        // Weekends (slots 5 and 6) sell double
        let week = [10.0, 10.0, 10.0, 10.0, 10.0, 20.0, 20.0];
        let actuals: Vec<f64> = week.iter().cycle().take(28).copied().collect();
        let multipliers = WeeklySeasonal::default().multipliers(&actuals);

        let global = 100.0 / 7.0;
        assert_relative_eq!(multipliers[0], 10.0 / global, epsilon = 1e-9);
        assert_relative_eq!(multipliers[6], 20.0 / global, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_series_has_unit_multipliers_and_zero_forecast() {
        let model = WeeklySeasonal::default();
        assert_eq!(model.multipliers(&[0.0; 7]), vec![1.0; 7]);

        let output = model.fit(&[0.0; 7], 7);
        assert_eq!(output.forecast(), &[0.0; 7]);
    }

    #[test]
    fn test_flat_series_is_reproduced() {
        let output = WeeklySeasonal::default().fit(&[4.0; 14], 3);
        for value in output.backtest() {
            assert_relative_eq!(value.unwrap(), 4.0, epsilon = 1e-9);
        }
        for value in output.forecast() {
            assert_relative_eq!(*value, 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_trend_and_multipliers_combine() {
        // Two weeks, the second one 2 higher on every day
        let actuals = [
            2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0,
        ];
        let output = WeeklySeasonal::default().fit(&actuals, 2);
        let bt: Vec<f64> = output.backtest().iter().map(|v| v.unwrap()).collect();

        // level 2, trend (16 - 2) / 14 = 1, global mean 9,
        // slot means 3, 5, 7, 9, 11, 13, 15
        assert_eq!(bt.len(), 14);
        assert_relative_eq!(bt[0], 2.0 * 3.0 / 9.0, epsilon = 1e-9);
        assert_relative_eq!(bt[3], 5.0, epsilon = 1e-9);
        assert_relative_eq!(bt[4], 6.0 * 11.0 / 9.0, epsilon = 1e-9);
        assert_relative_eq!(bt[10], 12.0, epsilon = 1e-9);
        assert_relative_eq!(bt[11], 13.0 * 11.0 / 9.0, epsilon = 1e-9);
        // Days 14 and 15 fall in slots 0 and 1
        assert_relative_eq!(output.forecast()[0], 16.0 * 3.0 / 9.0, epsilon = 1e-9);
        assert_relative_eq!(output.forecast()[1], 17.0 * 5.0 / 9.0, epsilon = 1e-9);
    }
}
