use async_trait::async_trait;
use chrono::NaiveDate;
use demand_forecast::{
    Algorithm, DateRange, EventPageSource, EventSource, FixedClock, ForecastConfig, ForecastError,
    ForecastSession, InMemoryEventSource, Paginated, RawEvent, Result, RunOutcome,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

const PRODUCT: &str = "SKU-7";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn sales(count: usize) -> Vec<RawEvent> {
    (0..count)
        .map(|i| RawEvent::new(format!("2024-06-{:02} 12:00:00", 1 + i % 30), "SALE", -1.0))
        .collect()
}

/// Holds the first fetch until released; later fetches return at once
struct GatedSource {
    inner: InMemoryEventSource,
    gate: Arc<Notify>,
    calls: AtomicUsize,
    fail_first: bool,
}

impl GatedSource {
    fn new(gate: Arc<Notify>, fail_first: bool) -> Self {
        Self {
            inner: InMemoryEventSource::new().with_events(PRODUCT, sales(30)),
            gate,
            calls: AtomicUsize::new(0),
            fail_first,
        }
    }
}

#[async_trait]
impl EventSource for GatedSource {
    async fn fetch_events(&self, product_id: &str, range: DateRange) -> Result<Vec<RawEvent>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
            if self.fail_first {
                return Err(ForecastError::DataFetch("page timed out".to_string()));
            }
        }
        self.inner.fetch_events(product_id, range).await
    }
}

struct BrokenSource;

#[async_trait]
impl EventSource for BrokenSource {
    async fn fetch_events(&self, _product_id: &str, _range: DateRange) -> Result<Vec<RawEvent>> {
        Err(ForecastError::fetch("connection reset by peer"))
    }
}

/// Serves pages from a fixed log, failing on one chosen offset
struct FlakyPages {
    events: Vec<RawEvent>,
    fail_at: Option<usize>,
    requests: Mutex<Vec<(usize, usize)>>,
}

#[async_trait]
impl EventPageSource for FlakyPages {
    async fn fetch_page(
        &self,
        _product_id: &str,
        _range: DateRange,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawEvent>> {
        self.requests.lock().unwrap().push((offset, limit));
        if self.fail_at == Some(offset) {
            return Err(ForecastError::DataFetch("page timed out".to_string()));
        }
        Ok(self.events.iter().skip(offset).take(limit).cloned().collect())
    }
}

#[tokio::test]
async fn test_completed_run_reports_the_window() {
    let source = InMemoryEventSource::new().with_events(PRODUCT, sales(30));
    let session = ForecastSession::with_clock(source, FixedClock(today()));
    let config = ForecastConfig::from_raw(30, 7, "WMA").unwrap();

    let outcome = session.recompute(PRODUCT, &config).await.unwrap();
    let report = outcome.into_report().expect("run should complete");

    assert_eq!(report.algorithm(), Algorithm::WeightedMovingAverage);
    assert_eq!(report.series.len(), 30);
    assert_eq!(report.series.total_demand(), 30.0);
    assert_eq!(report.forecast_rows().count(), 7);
    assert_eq!(session.current_generation(), 1);
}

#[tokio::test]
async fn test_superseded_run_is_dropped() {
    let gate = Arc::new(Notify::new());
    let source = GatedSource::new(gate.clone(), false);
    let session = ForecastSession::with_clock(source, FixedClock(today()));
    let slow = ForecastConfig::from_raw(90, 14, "MA").unwrap();
    let fast = ForecastConfig::from_raw(30, 7, "SES").unwrap();

    let (first, second) = tokio::join!(session.recompute(PRODUCT, &slow), async {
        let outcome = session.recompute(PRODUCT, &fast).await;
        gate.notify_one();
        outcome
    });

    assert_eq!(first.unwrap(), RunOutcome::Superseded { generation: 1 });
    let report = second.unwrap().into_report().expect("latest run should complete");
    assert_eq!(report.algorithm(), Algorithm::SimpleExponentialSmoothing);
    assert_eq!(session.current_generation(), 2);
}

#[tokio::test]
async fn test_superseded_run_swallows_its_fetch_error() {
    let gate = Arc::new(Notify::new());
    let session =
        ForecastSession::with_clock(GatedSource::new(gate.clone(), true), FixedClock(today()));
    let stale = ForecastConfig::from_raw(90, 14, "HW").unwrap();
    let latest = ForecastConfig::from_raw(30, 7, "MA").unwrap();

    let (first, second) = tokio::join!(session.recompute(PRODUCT, &stale), async {
        let outcome = session.recompute(PRODUCT, &latest).await;
        gate.notify_one();
        outcome
    });

    assert_eq!(first.unwrap(), RunOutcome::Superseded { generation: 1 });
    let report = second.unwrap().into_report().expect("latest run should complete");
    assert_eq!(report.algorithm(), Algorithm::MovingAverage);
}

#[tokio::test]
async fn test_fetch_failure_is_a_data_fetch_error() {
    let session = ForecastSession::with_clock(BrokenSource, FixedClock(today()));
    let err = session
        .recompute(PRODUCT, &ForecastConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastError::DataFetch(_)));
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_pages_are_read_until_a_short_page() {
    let pages = FlakyPages {
        events: sales(25),
        fail_at: None,
        requests: Mutex::new(Vec::new()),
    };
    let source = Paginated::new(pages).with_page_size(10);
    let range = DateRange::trailing(today(), 30);

    let events = source.fetch_events(PRODUCT, range).await.unwrap();
    assert_eq!(events.len(), 25);
    assert_eq!(
        *source.inner().requests.lock().unwrap(),
        vec![(0, 10), (10, 10), (20, 10)]
    );
}

#[tokio::test]
async fn test_exact_multiple_needs_one_empty_page() {
    let pages = FlakyPages {
        events: sales(20),
        fail_at: None,
        requests: Mutex::new(Vec::new()),
    };
    let source = Paginated::new(pages).with_page_size(10);

    let events = source
        .fetch_events(PRODUCT, DateRange::trailing(today(), 30))
        .await
        .unwrap();
    assert_eq!(events.len(), 20);
    assert_eq!(source.inner().requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_failing_page_fails_the_whole_run() {
    let pages = FlakyPages {
        events: sales(25),
        fail_at: Some(10),
        requests: Mutex::new(Vec::new()),
    };
    let session = ForecastSession::with_clock(
        Paginated::new(pages).with_page_size(10),
        FixedClock(today()),
    );

    let result = session.recompute(PRODUCT, &ForecastConfig::default()).await;
    assert!(matches!(result, Err(ForecastError::DataFetch(_))));
}

#[tokio::test]
async fn test_default_page_size() {
    let source = Paginated::new(InMemoryEventSource::new().with_events(PRODUCT, sales(2500)));
    assert_eq!(source.page_size(), 1000);

    let events = source
        .fetch_events(PRODUCT, DateRange::trailing(today(), 30))
        .await
        .unwrap();
    assert_eq!(events.len(), 2500);
}
