pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, NaiveDate, Utc};
use models::{
    cache::QuoteCache,
    chart::ChartPoint,
    query::PositionQuery,
    report::{PositionOutcome, PositionReport},
};
use providers::alphavantage::AlphaVantageProvider;
use providers::traits::QuoteProvider;
use services::{chart_service::ChartService, quote_service::QuoteService};

use errors::CoreError;

/// Main entry point for the Stock Pulse core library.
/// Holds the session state (quote cache, call quota) and the services
/// needed to resolve position checks.
#[must_use]
pub struct StockPulse {
    quote_service: QuoteService,
    chart_service: ChartService,
    cache: QuoteCache,
}

impl std::fmt::Debug for StockPulse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockPulse")
            .field("cached_reports", &self.cache.len())
            .field("calls_used", &self.quote_service.calls_used())
            .finish()
    }
}

impl StockPulse {
    /// Create a session backed by the default Alpha Vantage provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_provider(Box::new(AlphaVantageProvider::new(api_key.into())))
    }

    /// Create a session with any quote provider (the seam tests use to
    /// inject scripted providers).
    pub fn with_provider(provider: Box<dyn QuoteProvider>) -> Self {
        Self {
            quote_service: QuoteService::new(provider),
            chart_service: ChartService::new(),
            cache: QuoteCache::new(),
        }
    }

    // ── Position Checks ─────────────────────────────────────────────

    /// Validate the form fields and resolve the position.
    ///
    /// Validation failure is the only error this returns — once a query
    /// is well-formed, resolution always produces an outcome (cached,
    /// live, or demo; see `PositionOutcome`).
    pub async fn check_position(
        &mut self,
        symbol: &str,
        purchase_date: NaiveDate,
        units: f64,
    ) -> Result<PositionOutcome, CoreError> {
        let now = Utc::now();
        let query = PositionQuery::new(symbol, purchase_date, units, now.date_naive())?;
        Ok(self
            .quote_service
            .resolve_position_at(&mut self.cache, &query, now)
            .await)
    }

    /// `check_position` with an explicit clock, for callers that control
    /// time (tests of TTL behavior, replay tooling).
    pub async fn check_position_at(
        &mut self,
        symbol: &str,
        purchase_date: NaiveDate,
        units: f64,
        now: DateTime<Utc>,
    ) -> Result<PositionOutcome, CoreError> {
        let query = PositionQuery::new(symbol, purchase_date, units, now.date_naive())?;
        Ok(self
            .quote_service
            .resolve_position_at(&mut self.cache, &query, now)
            .await)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Chart-ready closing prices for a report's series: the last 30
    /// points, oldest to newest.
    #[must_use]
    pub fn price_chart(&self, report: &PositionReport) -> Vec<ChartPoint> {
        self.chart_service.price_chart(&report.series)
    }

    // ── Quota ───────────────────────────────────────────────────────

    /// Live-fetch attempts consumed so far this session.
    #[must_use]
    pub fn calls_used(&self) -> u32 {
        self.quote_service.calls_used()
    }

    /// Live-fetch attempts still available this session.
    #[must_use]
    pub fn calls_remaining(&self) -> u32 {
        self.quote_service.calls_remaining()
    }

    // ── Cache Management ────────────────────────────────────────────

    /// Number of cached reports (fresh and stale).
    #[must_use]
    pub fn cache_entries(&self) -> usize {
        self.cache.len()
    }

    /// Whether a (symbol, purchase date) pair has a cached report,
    /// fresh or stale.
    #[must_use]
    pub fn is_cached(&self, symbol: &str, purchase_date: NaiveDate) -> bool {
        self.cache
            .contains(&(symbol.trim().to_uppercase(), purchase_date))
    }

    /// Drop all cached reports. Does not touch the call quota.
    pub fn cache_clear(&mut self) {
        self.cache.clear();
    }
}
