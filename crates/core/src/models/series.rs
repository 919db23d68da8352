use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One trading day's OHLCV bar. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily price history for a single symbol: calendar date → bar.
///
/// Backed by a `BTreeMap` so iteration is always ascending by date.
/// Dates are NOT contiguous — weekends and exchange holidays are simply
/// absent, which is why purchase-date lookups need the "most recent
/// trading day at or before" fallback rather than an exact match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    bars: BTreeMap<NaiveDate, DailyBar>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the bar for a date.
    pub fn insert(&mut self, date: NaiveDate, bar: DailyBar) {
        self.bars.insert(date, bar);
    }

    /// Bar for an exact date, if that date was a trading day.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyBar> {
        self.bars.get(&date)
    }

    /// The latest bar dated at or before `date`, with its date.
    pub fn latest_at_or_before(&self, date: NaiveDate) -> Option<(NaiveDate, &DailyBar)> {
        self.bars
            .range(..=date)
            .next_back()
            .map(|(d, bar)| (*d, bar))
    }

    /// Closes ordered most-recent-first, capped at `limit`.
    /// This is the orientation the moving-average window consumes.
    pub fn recent_closes(&self, limit: usize) -> Vec<f64> {
        self.bars
            .values()
            .rev()
            .take(limit)
            .map(|bar| bar.close)
            .collect()
    }

    /// All (date, bar) pairs in ascending date order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, &DailyBar)> {
        self.bars.iter().map(|(d, bar)| (*d, bar))
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Date of the earliest bar, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.keys().next().copied()
    }

    /// Date of the most recent bar, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.keys().next_back().copied()
    }
}

impl FromIterator<(NaiveDate, DailyBar)> for TimeSeries {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, DailyBar)>>(iter: T) -> Self {
        Self {
            bars: iter.into_iter().collect(),
        }
    }
}
