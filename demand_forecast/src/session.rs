//! Interactive recompute loop with a stale-result guard
//!
//! Every parameter change starts a new run. Runs fetch asynchronously and
//! may finish out of order, so each one takes a generation number up front
//! and only the newest generation is allowed to publish a report.

use crate::config::ForecastConfig;
use crate::engine::{ForecastEngine, ForecastReport};
use crate::error::{ForecastError, Result};
use crate::series::DateRange;
use crate::source::{Clock, EventSource, SystemClock};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// How a recompute ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The run was still the newest when its data arrived
    Completed(ForecastReport),
    /// A later recompute started while this one was fetching
    Superseded { generation: u64 },
}

impl RunOutcome {
    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::Superseded { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<ForecastReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, RunOutcome::Superseded { .. })
    }
}

/// Owns the event source and the generation counter for one dashboard
pub struct ForecastSession<S, C = SystemClock> {
    source: S,
    clock: C,
    engine: ForecastEngine,
    generation: AtomicU64,
}

impl<S: EventSource> ForecastSession<S, SystemClock> {
    /// Create a session dated by the host clock
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: EventSource, C: Clock> ForecastSession<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            engine: ForecastEngine::default(),
            generation: AtomicU64::new(0),
        }
    }

    /// Replace the default keyword classification
    pub fn with_engine(mut self, engine: ForecastEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    /// Generation of the most recently started run, 0 before the first
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetch the product's events for the configured window and forecast.
    ///
    /// A fetch failure is returned as [`ForecastError::DataFetch`]. If another
    /// recompute started while this one was awaiting its events, whatever the
    /// fetch produced (events or an error) is dropped and
    /// [`RunOutcome::Superseded`] is returned instead.
    pub async fn recompute(&self, product_id: &str, config: &ForecastConfig) -> Result<RunOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let today = self.clock.today();
        let range = DateRange::trailing(today, config.window_days());

        debug!(
            product_id,
            generation,
            algorithm = config.algorithm.id(),
            start = %range.start(),
            end = %range.end(),
            "recompute started"
        );

        let fetched = self.source.fetch_events(product_id, range).await;

        let latest = self.current_generation();
        if latest != generation {
            debug!(
                product_id,
                generation,
                latest,
                failed = fetched.is_err(),
                "dropping superseded run"
            );
            return Ok(RunOutcome::Superseded { generation });
        }

        let events = fetched.map_err(|err| {
            warn!(product_id, generation, %err, "event fetch failed");
            match err {
                ForecastError::DataFetch(_) => err,
                other => ForecastError::fetch(other),
            }
        })?;

        let report = self.engine.run(product_id, &events, today, config)?;
        Ok(RunOutcome::Completed(report))
    }
}
