//! Upstream seams: where raw events and "today" come from

use crate::error::Result;
use crate::events::RawEvent;
use crate::series::DateRange;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

/// Rows requested per page by [`Paginated`]
pub const PAGE_SIZE: usize = 1000;

/// Pluggable provider of a product's transaction log.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// All events for `product_id` whose date falls inside `range`.
    ///
    /// Any failure aborts the run; callers never see a partial window.
    async fn fetch_events(&self, product_id: &str, range: DateRange) -> Result<Vec<RawEvent>>;
}

/// A backend that serves events one page at a time
#[async_trait]
pub trait EventPageSource: Send + Sync {
    async fn fetch_page(
        &self,
        product_id: &str,
        range: DateRange,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawEvent>>;
}

/// Turns a paged backend into an [`EventSource`] by reading pages until a
/// short one arrives.
#[derive(Debug, Clone)]
pub struct Paginated<P> {
    pages: P,
    page_size: usize,
}

impl<P: EventPageSource> Paginated<P> {
    pub fn new(pages: P) -> Self {
        Self {
            pages,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn inner(&self) -> &P {
        &self.pages
    }
}

#[async_trait]
impl<P: EventPageSource> EventSource for Paginated<P> {
    async fn fetch_events(&self, product_id: &str, range: DateRange) -> Result<Vec<RawEvent>> {
        let mut events = Vec::new();
        let mut offset = 0;
        loop {
            let page = self
                .pages
                .fetch_page(product_id, range, offset, self.page_size)
                .await?;
            let received = page.len();
            events.extend(page);
            if received < self.page_size {
                break;
            }
            offset += received;
        }
        debug!(product_id, events = events.len(), "fetched paginated events");
        Ok(events)
    }
}

/// Event log held in memory, keyed by product id
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSource {
    events: HashMap<String, Vec<RawEvent>>,
}

impl InMemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append events to a product's log
    pub fn insert<I>(&mut self, product_id: impl Into<String>, events: I)
    where
        I: IntoIterator<Item = RawEvent>,
    {
        self.events
            .entry(product_id.into())
            .or_default()
            .extend(events);
    }

    pub fn with_events<I>(mut self, product_id: impl Into<String>, events: I) -> Self
    where
        I: IntoIterator<Item = RawEvent>,
    {
        self.insert(product_id, events);
        self
    }

    /// Events of one product inside `range`, in stored order.
    ///
    /// Events with an unreadable timestamp are kept; the series constructor
    /// decides what to do with them.
    fn select(&self, product_id: &str, range: DateRange) -> Vec<RawEvent> {
        self.events
            .get(product_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.date().map_or(true, |d| range.contains(d)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventSource for InMemoryEventSource {
    async fn fetch_events(&self, product_id: &str, range: DateRange) -> Result<Vec<RawEvent>> {
        Ok(self.select(product_id, range))
    }
}

#[async_trait]
impl EventPageSource for InMemoryEventSource {
    async fn fetch_page(
        &self,
        product_id: &str,
        range: DateRange,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawEvent>> {
        Ok(self
            .select(product_id, range)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }
}

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stopped on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
