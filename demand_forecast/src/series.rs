//! Daily demand series reconstruction
//!
//! Turns a product's raw transaction log into one demand value per calendar
//! day of the training window. Days without outbound activity are present
//! with zero demand, so the series is always contiguous.

use crate::error::{ForecastError, Result};
use crate::events::{EventClassifier, RawEvent};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// An inclusive range of calendar dates, never empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form of [`DateRange`]
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ForecastError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Create a new inclusive range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ForecastError::Validation(format!(
                "Date range start ({}) is after its end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days`-long window ending on (and including) `today`
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let span = u64::from(days.max(1) - 1);
        let start = today.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, both ends included
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every date in the range in ascending order
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len_days())
    }
}

/// Demand observed on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub date: NaiveDate,
    pub actual: f64,
}

/// A gap-free, date-ordered sequence of daily demand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandSeries {
    points: Vec<DemandPoint>,
}

impl DemandSeries {
    /// Rebuild the daily demand series for `range` from raw events.
    ///
    /// Events whose timestamp cannot be parsed, that fall outside the range,
    /// or that the classifier does not consider outbound are ignored.
    pub fn from_events<C>(events: &[RawEvent], range: DateRange, classifier: &C) -> Self
    where
        C: EventClassifier + ?Sized,
    {
        let mut daily: BTreeMap<NaiveDate, f64> = range.iter_days().map(|d| (d, 0.0)).collect();
        let mut skipped = 0usize;

        for event in events {
            let Some(date) = event.date() else {
                skipped += 1;
                continue;
            };
            if !classifier.is_outbound_like(&event.kind, event.quantity_change) {
                continue;
            }
            if let Some(actual) = daily.get_mut(&date) {
                *actual += event.quantity_change.abs();
            }
        }

        if skipped > 0 {
            debug!(skipped, "ignored events with unparseable timestamps");
        }

        let points = daily
            .into_iter()
            .map(|(date, actual)| DemandPoint { date, actual })
            .collect();
        Self { points }
    }

    /// Build a series from consecutive daily values starting at `start`
    pub fn from_actuals(start: NaiveDate, actuals: &[f64]) -> Self {
        let points = start
            .iter_days()
            .zip(actuals)
            .map(|(date, &actual)| DemandPoint {
                date,
                actual: actual.max(0.0),
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[DemandPoint] {
        &self.points
    }

    /// The demand values in date order
    pub fn actuals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.actual).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Total demand across the whole window
    pub fn total_demand(&self) -> f64 {
        self.points.iter().map(|p| p.actual).sum()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::KeywordClassifier;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_trailing_range() {
        let range = DateRange::trailing(day(30), 30);
        assert_eq!(range.start(), day(1));
        assert_eq!(range.end(), day(30));
        assert_eq!(range.len_days(), 30);
        assert!(range.contains(day(1)));
        assert!(!range.contains(day(31)));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(DateRange::new(day(5), day(4)).is_err());
        assert_eq!(DateRange::new(day(4), day(4)).unwrap().len_days(), 1);
    }

    #[test]
    fn test_deserialized_range_is_validated() {
        let range: DateRange =
            serde_json::from_str(r#"{"start": "2024-05-01", "end": "2024-05-03"}"#).unwrap();
        assert_eq!(range.len_days(), 3);

        let inverted =
            serde_json::from_str::<DateRange>(r#"{"start": "2024-05-02", "end": "2024-05-01"}"#);
        assert!(inverted.is_err());
    }

    #[test]
    fn test_zero_activity_days_are_filled() {
        let range = DateRange::trailing(day(10), 10);
        let series = DemandSeries::from_events(&[], range, &KeywordClassifier::default());

        assert_eq!(series.len(), 10);
        assert!(series.actuals().iter().all(|&v| v == 0.0));
        assert_eq!(series.first_date(), Some(day(1)));
        assert_eq!(series.last_date(), Some(day(10)));
    }

    #[test]
    fn test_same_day_events_accumulate() {
        let range = DateRange::trailing(day(3), 3);
        let events = vec![
            RawEvent::new("2024-05-02 08:00:00", "SALE", -3.0),
            RawEvent::new("2024-05-02 15:30:00", "ISSUE", 2.0),
            RawEvent::new("2024-05-02 16:00:00", "RECEIPT", 50.0),
            RawEvent::new("not a date", "SALE", -100.0),
            RawEvent::new("2024-04-30", "SALE", -7.0),
        ];
        let series = DemandSeries::from_events(&events, range, &KeywordClassifier::default());

        assert_eq!(series.actuals(), vec![0.0, 5.0, 0.0]);
        assert_eq!(series.total_demand(), 5.0);
    }

    #[test]
    fn test_from_actuals_clamps_negative_values() {
        let series = DemandSeries::from_actuals(day(1), &[1.0, -2.0, 3.0]);
        assert_eq!(series.actuals(), vec![1.0, 0.0, 3.0]);
        assert_eq!(series.dates(), vec![day(1), day(2), day(3)]);
    }
}
