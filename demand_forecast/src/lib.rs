//! # Demand Forecast
//!
//! Daily demand forecasting for warehouse products.
//!
//! ## Features
//!
//! - Reconstruction of a gap-free daily demand series from a raw transaction log
//! - Seven selectable forecasting models (moving averages, exponential
//!   smoothing, Holt, Holt-Winters, ARIMA-lite, weekly seasonal)
//! - Backtest accuracy scoring (RMSE, MAPE, MAE)
//! - A merged history-plus-forecast timeline for charting
//! - An async recompute session that discards superseded runs
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use demand_forecast::{Algorithm, ForecastConfig, ForecastEngine, RawEvent};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
//! let events = vec![
//!     RawEvent::new("2024-06-28 14:02:11", "SALE", -4.0),
//!     RawEvent::new("2024-06-29 09:15:00", "TRANSFER OUT", -6.0),
//!     RawEvent::new("2024-06-29 11:40:00", "RECEIPT", 50.0),
//! ];
//!
//! let config = ForecastConfig::from_raw(30, 7, "SES")?;
//! let report = ForecastEngine::default().run("SKU-42", &events, today, &config)?;
//!
//! assert_eq!(report.algorithm(), Algorithm::SimpleExponentialSmoothing);
//! assert_eq!(report.series.total_demand(), 10.0);
//! assert_eq!(report.forecast_rows().count(), 7);
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod metrics;
pub mod models;
pub mod series;
pub mod session;
pub mod source;
pub mod timeline;

// Re-export commonly used types
pub use crate::config::{Algorithm, ArimaBand, ForecastConfig, Horizon, TrainingWindow};
pub use crate::engine::{ForecastEngine, ForecastReport};
pub use crate::error::{ForecastError, Result};
pub use crate::events::{EventClassifier, KeywordClassifier, RawEvent};
pub use crate::metrics::AccuracyMetrics;
pub use crate::models::{ForecastModel, ModelDescriptor, ModelOutput};
pub use crate::series::{DateRange, DemandPoint, DemandSeries};
pub use crate::session::{ForecastSession, RunOutcome};
pub use crate::source::{
    Clock, EventPageSource, EventSource, FixedClock, InMemoryEventSource, Paginated, SystemClock,
};
pub use crate::timeline::TimelineRow;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
