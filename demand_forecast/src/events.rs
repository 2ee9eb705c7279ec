//! Raw transaction-log events and outbound classification

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a product's transaction log, as delivered by the event source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Timestamp text exactly as stored upstream
    pub occurred_at: String,
    /// Free-text transaction type label
    pub kind: String,
    /// Signed stock movement
    pub quantity_change: f64,
}

impl RawEvent {
    /// Create a new raw event
    pub fn new(occurred_at: impl Into<String>, kind: impl Into<String>, quantity_change: f64) -> Self {
        Self {
            occurred_at: occurred_at.into(),
            kind: kind.into(),
            quantity_change,
        }
    }

    /// Calendar date of the event, if its timestamp can be parsed
    pub fn date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.occurred_at)
    }
}

/// Parse the calendar date out of an event timestamp.
///
/// Accepts RFC 3339 (normalised to UTC), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` and bare `YYYY-MM-DD`.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Decides whether a transaction represents stock leaving inventory
pub trait EventClassifier: Send + Sync {
    fn is_outbound_like(&self, label: &str, quantity_change: f64) -> bool;
}

impl<F> EventClassifier for F
where
    F: Fn(&str, f64) -> bool + Send + Sync,
{
    fn is_outbound_like(&self, label: &str, quantity_change: f64) -> bool {
        self(label, quantity_change)
    }
}

/// Label fragments that mark a transaction as demand
pub const OUTBOUND_KEYWORDS: [&str; 6] = ["OUT", "TRANS", "DISP", "ISSUE", "SALE", "USE"];

/// Label fragments that veto the negative-quantity fallback
pub const NON_DEMAND_KEYWORDS: [&str; 5] = ["ADJUST", "CYCLE", "IN", "RECV", "RECEIPT"];

/// Keyword and sign heuristic over free-text transaction labels.
///
/// An event is outbound-like when its label contains an outbound keyword, or
/// when its quantity is negative and the label contains no non-demand keyword.
/// Matching is case-insensitive substring matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    outbound: Vec<String>,
    non_demand: Vec<String>,
}

impl KeywordClassifier {
    /// Build a classifier from custom keyword lists
    pub fn new<I, J, S, T>(outbound: I, non_demand: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            outbound: outbound
                .into_iter()
                .map(|k| k.as_ref().to_uppercase())
                .collect(),
            non_demand: non_demand
                .into_iter()
                .map(|k| k.as_ref().to_uppercase())
                .collect(),
        }
    }

    pub fn outbound_keywords(&self) -> &[String] {
        &self.outbound
    }

    pub fn non_demand_keywords(&self) -> &[String] {
        &self.non_demand
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(OUTBOUND_KEYWORDS, NON_DEMAND_KEYWORDS)
    }
}

impl EventClassifier for KeywordClassifier {
    fn is_outbound_like(&self, label: &str, quantity_change: f64) -> bool {
        let label = label.to_uppercase();
        let contains_any = |keywords: &[String]| keywords.iter().any(|k| label.contains(k.as_str()));

        if contains_any(&self.outbound) {
            return true;
        }
        quantity_change < 0.0 && !contains_any(&self.non_demand)
    }
}
