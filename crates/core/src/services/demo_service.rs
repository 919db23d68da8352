use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::models::query::PositionQuery;
use crate::models::report::PositionReport;
use crate::models::series::{DailyBar, TimeSeries};
use crate::services::metrics_service::{round_2dp, MetricsService};

/// Days of fabricated history (today back 30 days → 31 bars).
const DEMO_HISTORY_DAYS: i64 = 30;

/// Produces a plausible fabricated position report when live data is
/// unavailable or the call quota is exhausted.
///
/// Values are drawn from the thread RNG on every call — deliberately
/// unseeded, so repeated demo lookups visibly differ and nobody mistakes
/// the output for a stable real quote. Nothing here touches the network
/// or the cache.
pub struct DemoDataService {
    metrics_service: MetricsService,
}

impl DemoDataService {
    pub fn new() -> Self {
        Self {
            metrics_service: MetricsService::new(),
        }
    }

    /// Fabricate a full report for `query`, with the synthetic series
    /// ending on `today`.
    ///
    /// Ranges match what the real path plausibly produces:
    /// - current price uniform in [50, 450)
    /// - purchase price = current × uniform [0.7, 1.3)
    /// - daily change percent uniform in [-3, 7)
    /// - 7/30-day averages = current jittered by ±4% / ±5%
    pub fn generate(&self, query: &PositionQuery, today: NaiveDate) -> PositionReport {
        let mut rng = rand::thread_rng();

        let current_price = round_2dp(rng.gen_range(50.0..450.0));
        let purchase_price = round_2dp(current_price * rng.gen_range(0.7..1.3));
        let daily_change_percent = round_2dp(rng.gen_range(-3.0..7.0));
        let avg_7 = round_2dp(current_price * (1.0 + rng.gen_range(-0.04..0.04)));
        let avg_30 = round_2dp(current_price * (1.0 + rng.gen_range(-0.05..0.05)));

        PositionReport {
            symbol: query.symbol.clone(),
            current_price,
            purchase_price,
            units: query.units,
            investment_value: self
                .metrics_service
                .investment_value(query.units, purchase_price),
            daily_change_percent,
            avg_7,
            avg_30,
            sentiment: self.metrics_service.sentiment(daily_change_percent),
            series: self.generate_series(current_price, today, &mut rng),
        }
    }

    /// Build a 31-point daily random walk ending on `today`.
    ///
    /// Each step multiplies the running close by 1 + uniform(-2.5%, +2.5%);
    /// open/high/low are derived from the close with small offsets.
    fn generate_series(
        &self,
        start_price: f64,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> TimeSeries {
        let mut series = TimeSeries::new();
        let mut close = start_price;

        for offset in (0..=DEMO_HISTORY_DAYS).rev() {
            let date = today - Duration::days(offset);
            close *= 1.0 + rng.gen_range(-0.025..0.025);

            series.insert(
                date,
                DailyBar {
                    open: close * rng.gen_range(0.99..1.01),
                    high: close * rng.gen_range(1.0..1.02),
                    low: close * rng.gen_range(0.96..0.98),
                    close,
                    volume: rng.gen_range(0..10_000_000),
                },
            );
        }

        series
    }
}

impl Default for DemoDataService {
    fn default() -> Self {
        Self::new()
    }
}
