use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::cache::QuoteCache;
use crate::models::query::PositionQuery;
use crate::models::report::{DataOrigin, PositionOutcome, PositionReport};
use crate::providers::traits::QuoteProvider;
use crate::services::demo_service::DemoDataService;
use crate::services::history_service::HistoryService;
use crate::services::metrics_service::{MetricsService, LONG_WINDOW, SHORT_WINDOW};

/// Live-fetch attempts permitted per session.
pub const CALL_LIMIT: u32 = 5;

/// The policy engine: decides per submission whether to serve from cache,
/// spend a quota slot on a live fetch, or fall back to synthetic data.
///
/// Resolution never fails from the caller's perspective — a failed live
/// fetch degrades to a demo report with the error surfaced alongside it.
/// The quota counter lives here; the cache is passed in by the caller so
/// tests (and embedders) control its lifetime and isolation.
pub struct QuoteService {
    provider: Box<dyn QuoteProvider>,
    history_service: HistoryService,
    metrics_service: MetricsService,
    demo_service: DemoDataService,
    calls_used: u32,
}

impl QuoteService {
    pub fn new(provider: Box<dyn QuoteProvider>) -> Self {
        Self {
            provider,
            history_service: HistoryService::new(),
            metrics_service: MetricsService::new(),
            demo_service: DemoDataService::new(),
            calls_used: 0,
        }
    }

    /// Live-fetch attempts consumed so far this session.
    /// Counts attempts, not successes, and is never reset.
    pub fn calls_used(&self) -> u32 {
        self.calls_used
    }

    /// Live-fetch attempts still available this session.
    pub fn calls_remaining(&self) -> u32 {
        CALL_LIMIT.saturating_sub(self.calls_used)
    }

    /// Resolve a position query using the wall clock.
    pub async fn resolve_position(
        &mut self,
        cache: &mut QuoteCache,
        query: &PositionQuery,
    ) -> PositionOutcome {
        self.resolve_position_at(cache, query, Utc::now()).await
    }

    /// Resolve a position query at an explicit instant (`now` drives the
    /// cache TTL check and the demo series' end date).
    ///
    /// Decision order, evaluated once per submission:
    /// 1. Fresh cache entry → serve it, no quota spent.
    /// 2. Quota available → count the attempt, fetch live, cache on
    ///    success; on failure fall back to demo for this submission with
    ///    the error surfaced on the outcome.
    /// 3. Quota exhausted → demo, never cached.
    pub async fn resolve_position_at(
        &mut self,
        cache: &mut QuoteCache,
        query: &PositionQuery,
        now: DateTime<Utc>,
    ) -> PositionOutcome {
        let key = query.cache_key();

        if let Some(report) = cache.get_fresh(&key, now) {
            log::debug!("cache hit for {}/{}", query.symbol, query.purchase_date);
            return self.outcome(report.clone(), DataOrigin::Cached, None);
        }

        if self.calls_used < CALL_LIMIT {
            // Counted per attempt, success or not: a symbol that keeps
            // failing cannot probe the remote quota indefinitely.
            self.calls_used += 1;

            match self.fetch_live(query).await {
                Ok(report) => {
                    cache.insert(key, report.clone(), now);
                    log::debug!(
                        "live fetch for {} ({}/{} calls used)",
                        query.symbol,
                        self.calls_used,
                        CALL_LIMIT
                    );
                    return self.outcome(report, DataOrigin::Live, None);
                }
                Err(e) => {
                    log::warn!("live fetch for {} failed, using demo data: {e}", query.symbol);
                    let report = self.demo_service.generate(query, now.date_naive());
                    return self.outcome(report, DataOrigin::Demo, Some(e.to_string()));
                }
            }
        }

        log::warn!(
            "call limit ({CALL_LIMIT}) reached, using demo data for {}",
            query.symbol
        );
        let report = self.demo_service.generate(query, now.date_naive());
        self.outcome(report, DataOrigin::Demo, None)
    }

    /// The live path: provider fetch → purchase-price resolution →
    /// derived metrics → assembled report.
    async fn fetch_live(&self, query: &PositionQuery) -> Result<PositionReport, CoreError> {
        let (quote, series) = self.provider.fetch_position_data(&query.symbol).await?;

        let purchase_price =
            self.history_service
                .resolve_price(&series, &query.symbol, query.purchase_date)?;

        let avg_7 = self
            .metrics_service
            .moving_average(&series, &query.symbol, SHORT_WINDOW)?;
        let avg_30 = self
            .metrics_service
            .moving_average(&series, &query.symbol, LONG_WINDOW)?;

        Ok(PositionReport {
            symbol: query.symbol.clone(),
            current_price: quote.price,
            purchase_price,
            units: query.units,
            investment_value: self
                .metrics_service
                .investment_value(query.units, purchase_price),
            daily_change_percent: quote.change_percent,
            avg_7,
            avg_30,
            sentiment: self.metrics_service.sentiment(quote.change_percent),
            series,
        })
    }

    fn outcome(
        &self,
        report: PositionReport,
        origin: DataOrigin,
        fetch_error: Option<String>,
    ) -> PositionOutcome {
        PositionOutcome {
            report,
            origin,
            calls_used: self.calls_used,
            call_limit: CALL_LIMIT,
            fetch_error,
        }
    }
}
