use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::series::TimeSeries;

/// Resolves the close price in effect on a given calendar date.
///
/// Markets are closed on weekends and holidays, so exact-date lookups
/// routinely miss; the standard convention for backfilling a purchase
/// price is the close of the most recent trading day at or before the
/// requested date.
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// Close price for `target`, falling back to the nearest earlier
    /// trading day.
    ///
    /// 1. Exact-date hit → that day's close.
    /// 2. Otherwise → close of the latest date ≤ `target`.
    /// 3. No such date (target predates all history) → `PriceNotAvailable`.
    ///
    /// A target on or after the newest bar resolves to the newest close —
    /// "bought today" means "bought at the latest available close".
    pub fn resolve_price(
        &self,
        series: &TimeSeries,
        symbol: &str,
        target: NaiveDate,
    ) -> Result<f64, CoreError> {
        if let Some(bar) = series.get(target) {
            return Ok(bar.close);
        }

        series
            .latest_at_or_before(target)
            .map(|(_, bar)| bar.close)
            .ok_or_else(|| CoreError::PriceNotAvailable {
                symbol: symbol.to_string(),
                date: target.to_string(),
            })
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
