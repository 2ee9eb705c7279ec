//! Merges history and forecast into one date-ordered timeline

use crate::models::ModelOutput;
use crate::series::DemandSeries;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day on the chart.
///
/// Historical rows carry the actual demand and, when the model had one, its
/// backtest estimate. Future rows carry only the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub date: NaiveDate,
    pub actual: Option<f64>,
    pub backtest: Option<f64>,
    pub forecast: Option<f64>,
}

impl TimelineRow {
    pub fn history(date: NaiveDate, actual: f64, backtest: Option<f64>) -> Self {
        Self {
            date,
            actual: Some(actual),
            backtest,
            forecast: None,
        }
    }

    pub fn projected(date: NaiveDate, forecast: f64) -> Self {
        Self {
            date,
            actual: None,
            backtest: None,
            forecast: Some(forecast),
        }
    }

    /// Short date label, e.g. `May 3`
    pub fn display_label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }

    pub fn is_forecast(&self) -> bool {
        self.forecast.is_some()
    }
}

/// Lay the historical series and the model output end to end.
///
/// Forecast days follow the last historical day. When there is no history
/// they start the day after `today`.
pub fn assemble(series: &DemandSeries, output: &ModelOutput, today: NaiveDate) -> Vec<TimelineRow> {
    let mut rows = Vec::with_capacity(series.len() + output.horizon());

    rows.extend(series.points().iter().enumerate().map(|(i, point)| {
        let backtest = output.backtest().get(i).copied().flatten();
        TimelineRow::history(point.date, point.actual, backtest)
    }));

    let anchor = series.last_date().unwrap_or(today);
    let future_days = anchor
        .checked_add_days(Days::new(1))
        .into_iter()
        .flat_map(|first| first.iter_days());
    rows.extend(
        future_days
            .zip(output.forecast())
            .map(|(date, &value)| TimelineRow::projected(date, value)),
    );

    rows
}
