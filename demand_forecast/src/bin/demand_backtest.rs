use chrono::{Datelike, Days, NaiveDate, Weekday};
use demand_forecast::{
    Algorithm, FixedClock, ForecastConfig, ForecastSession, Horizon, InMemoryEventSource,
    RawEvent, RunOutcome, TrainingWindow,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PRODUCT: &str = "SKU-DEMO";

// Generate a synthetic transaction log: weekday picks with a weekend peak,
// slow growth, periodic receipts and the odd cycle count correction.
fn generate_events(today: NaiveDate, days: u64, seed: u64) -> Vec<RawEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut events = Vec::new();

    for offset in (0..days).rev() {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            continue;
        };
        let day_index = (days - offset) as f64;

        let base = 12.0 + day_index * 0.05;
        let weekly = match date.weekday() {
            Weekday::Sat | Weekday::Sun => 1.6,
            Weekday::Mon => 0.8,
            _ => 1.0,
        };

        // Split the day's demand across a few orders
        let orders = rng.gen_range(1..=4);
        for order in 0..orders {
            let quantity = (base * weekly / orders as f64 * rng.gen_range(0.6..1.4)).round();
            if quantity <= 0.0 {
                continue;
            }
            let kind = if order % 2 == 0 { "SALE" } else { "TRANSFER OUT" };
            events.push(RawEvent::new(
                format!("{} {:02}:{:02}:00", date, 8 + order * 2, rng.gen_range(0..60)),
                kind,
                -quantity,
            ));
        }

        if date.weekday() == Weekday::Wed {
            events.push(RawEvent::new(format!("{}T06:00:00Z", date), "RECEIPT", 120.0));
        }
        if rng.gen_bool(0.05) {
            events.push(RawEvent::new(
                format!("{} 18:00:00", date),
                "CYCLE COUNT ADJUSTMENT",
                -rng.gen_range(1.0..5.0_f64).round(),
            ));
        }
    }

    events
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    println!("Warehouse Demand Forecast Backtest");
    println!("==================================");

    let today = NaiveDate::from_ymd_opt(2024, 6, 30).ok_or("invalid demo date")?;
    let events = generate_events(today, 150, 7);
    println!("Generated {} events over 150 days for {}", events.len(), PRODUCT);

    let source = InMemoryEventSource::new().with_events(PRODUCT, events);
    let session = ForecastSession::with_clock(source, FixedClock(today));

    for window in TrainingWindow::ALL {
        println!("\nTraining window: {} days, horizon: 14 days", window.days());
        println!("{:<32} {:>8} {:>8} {:>8} {:>12}", "Model", "RMSE", "MAE", "MAPE %", "14d total");

        for algorithm in Algorithm::ALL {
            let config = ForecastConfig::new(window, Horizon::Days14, algorithm);
            let RunOutcome::Completed(report) = session.recompute(PRODUCT, &config).await? else {
                continue;
            };

            println!(
                "{:<32} {:>8.2} {:>8.2} {:>8.1} {:>12.1}",
                algorithm.label(),
                report.metrics.rmse,
                report.metrics.mae,
                report.metrics.mape,
                report.output.forecast_total()
            );
        }
    }

    // Show the chart data of one run
    let config = ForecastConfig::new(TrainingWindow::Days30, Horizon::Days7, Algorithm::HoltWinters);
    if let Some(report) = session.recompute(PRODUCT, &config).await?.into_report() {
        println!("\n{} over the last 30 days", config.algorithm.label());
        println!("{}", report.metrics);
        for row in report.timeline.iter().rev().take(10).rev() {
            let cell = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v));
            println!(
                "  {:<8} actual {:>6}  backtest {:>6}  forecast {:>6}",
                row.display_label(),
                cell(row.actual),
                cell(row.backtest),
                cell(row.forecast)
            );
        }
    }

    Ok(())
}
