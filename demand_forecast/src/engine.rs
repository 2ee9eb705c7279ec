//! One full forecast run: series, model, accuracy and timeline

use crate::config::{Algorithm, ForecastConfig};
use crate::error::Result;
use crate::events::{EventClassifier, KeywordClassifier, RawEvent};
use crate::metrics::AccuracyMetrics;
use crate::models::{self, ModelOutput};
use crate::series::{DateRange, DemandSeries};
use crate::timeline::{self, TimelineRow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Everything the dashboard needs to draw one product's forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub product_id: String,
    pub config: ForecastConfig,
    pub series: DemandSeries,
    pub output: ModelOutput,
    pub metrics: AccuracyMetrics,
    pub timeline: Vec<TimelineRow>,
}

impl ForecastReport {
    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// Forecast rows only
    pub fn forecast_rows(&self) -> impl Iterator<Item = &TimelineRow> {
        self.timeline.iter().filter(|row| row.is_forecast())
    }

    /// Pretty-printed JSON rendering of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs forecasts for one warehouse's classification rules
pub struct ForecastEngine {
    classifier: Box<dyn EventClassifier>,
}

impl ForecastEngine {
    /// Create an engine that classifies events with `classifier`
    pub fn new<C: EventClassifier + 'static>(classifier: C) -> Self {
        Self {
            classifier: Box::new(classifier),
        }
    }

    pub fn classifier(&self) -> &dyn EventClassifier {
        self.classifier.as_ref()
    }

    /// Rebuild the product's demand series from `events` and forecast it.
    ///
    /// The training window ends on `today`. The only failure is a
    /// configuration whose smoothing constants are out of range.
    pub fn run(
        &self,
        product_id: &str,
        events: &[RawEvent],
        today: NaiveDate,
        config: &ForecastConfig,
    ) -> Result<ForecastReport> {
        let range = DateRange::trailing(today, config.window_days());
        let series = DemandSeries::from_events(events, range, self.classifier.as_ref());
        debug!(
            product_id,
            events = events.len(),
            days = series.len(),
            total = series.total_demand(),
            "built demand series"
        );
        self.forecast_series(product_id, series, today, config)
    }

    /// Forecast an already built series
    pub fn forecast_series(
        &self,
        product_id: &str,
        series: DemandSeries,
        today: NaiveDate,
        config: &ForecastConfig,
    ) -> Result<ForecastReport> {
        let model = models::build(config)?;
        let actuals = series.actuals();
        let output = model.fit(&actuals, config.horizon_days());
        let metrics = AccuracyMetrics::evaluate(&actuals, output.backtest());
        let timeline = timeline::assemble(&series, &output, today);

        debug!(
            product_id,
            algorithm = config.algorithm.id(),
            scored = metrics.points,
            horizon = output.horizon(),
            "forecast complete"
        );

        Ok(ForecastReport {
            product_id: product_id.to_string(),
            config: *config,
            series,
            output,
            metrics,
            timeline,
        })
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(KeywordClassifier::default())
    }
}

impl fmt::Debug for ForecastEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastEngine").finish_non_exhaustive()
    }
}
