use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;

use super::report::PositionReport;

/// Cache key: (symbol, purchase_date), e.g. ("AAPL", 2025-06-01).
pub type QuoteCacheKey = (String, NaiveDate);

/// How long a cached report stays servable.
pub const CACHE_TTL_SECS: i64 = 5 * 60;

/// A stored report with its insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub report: PositionReport,
    pub inserted_at: DateTime<Utc>,
}

/// Session-local cache of computed position reports.
///
/// Staleness is checked lazily at read time against a 5-minute TTL;
/// entries are never proactively evicted, so the map grows for the life
/// of the session. Re-inserting a key overwrites its entry. Only live
/// results are stored — the orchestrator never writes demo data here,
/// so a fabricated report can't be served back as if it were real.
#[derive(Debug, Clone, Default)]
pub struct QuoteCache {
    entries: HashMap<QuoteCacheKey, CacheEntry>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached report for `key`, if one exists and is younger than the
    /// TTL at `now`. A stale entry is treated as a miss (but kept in the
    /// map — the next live result overwrites it).
    pub fn get_fresh(&self, key: &QuoteCacheKey, now: DateTime<Utc>) -> Option<&PositionReport> {
        let entry = self.entries.get(key)?;
        if now - entry.inserted_at < Duration::seconds(CACHE_TTL_SECS) {
            Some(&entry.report)
        } else {
            None
        }
    }

    /// Store a report under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: QuoteCacheKey, report: PositionReport, now: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                report,
                inserted_at: now,
            },
        );
    }

    /// Whether `key` has an entry at all, fresh or stale.
    pub fn contains(&self, key: &QuoteCacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries currently held (including stale ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached reports.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
