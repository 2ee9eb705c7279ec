//! # Stockroom
//!
//! Umbrella crate for the warehouse demand forecasting workspace.
//!
//! - [`demand_math`]: streaming averages, smoothing recurrences and summary statistics
//! - [`demand_forecast`]: demand series reconstruction, the forecasting models,
//!   accuracy scoring and the recompute session
//!
//! ## Example
//!
//! ```
//! use stockroom_workspace::prelude::*;
//!
//! let config = ForecastConfig::from_raw(30, 7, "HOLT").unwrap();
//! assert_eq!(config.algorithm, Algorithm::Holt);
//! assert_eq!(stockroom_workspace::algorithm_ids().len(), 7);
//! ```

pub use demand_forecast;
pub use demand_math;

/// The types most callers need
pub mod prelude {
    pub use demand_forecast::{
        AccuracyMetrics, Algorithm, ArimaBand, Clock, DateRange, DemandSeries, EventSource,
        FixedClock, ForecastConfig, ForecastEngine, ForecastError, ForecastReport,
        ForecastSession, Horizon, InMemoryEventSource, RawEvent, RunOutcome, SystemClock,
        TimelineRow, TrainingWindow,
    };
    pub use demand_math::SmoothingParams;
}

/// Ids of the selectable algorithms, in display order
pub fn algorithm_ids() -> Vec<&'static str> {
    demand_forecast::models::registry()
        .into_iter()
        .map(|descriptor| descriptor.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_algorithm_ids() {
        assert_eq!(
            algorithm_ids(),
            vec!["MA", "WMA", "SES", "HOLT", "HW", "ARIMA", "SEASONAL"]
        );
    }

    #[test]
    fn test_prelude_runs_a_forecast() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let events = vec![RawEvent::new("2024-01-30 08:00:00", "ISSUE", 4.0)];
        let report = ForecastEngine::default()
            .run("SKU-1", &events, today, &ForecastConfig::default())
            .unwrap();

        assert_eq!(report.series.total_demand(), 4.0);
        assert_eq!(report.config.smoothing, SmoothingParams::DEFAULT);
    }
}
