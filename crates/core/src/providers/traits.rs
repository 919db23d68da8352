use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::Quote;
use crate::models::series::TimeSeries;

/// Trait abstraction over the remote quote API.
///
/// The orchestrator only sees this seam, so tests inject scripted
/// providers and a different data vendor can be swapped in without
/// touching the policy code.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch everything one position check needs: the current quote and
    /// the daily time series for `symbol`, in that order. The two remote
    /// calls are sequential — a quote failure short-circuits before the
    /// series call is attempted. No retries; a single failure surfaces
    /// immediately.
    async fn fetch_position_data(
        &self,
        symbol: &str,
    ) -> Result<(Quote, TimeSeries), CoreError>;
}
