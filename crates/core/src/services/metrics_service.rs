use crate::errors::CoreError;
use crate::models::report::Sentiment;
use crate::models::series::TimeSeries;

/// Moving-average window for the short-term indicator.
pub const SHORT_WINDOW: usize = 7;

/// Moving-average window for the long-term indicator.
pub const LONG_WINDOW: usize = 30;

/// Computes derived position metrics: moving averages, sentiment
/// classification, and investment value.
///
/// All calculations are pure — no clock, no I/O.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Mean of the `window` most recent closes.
    ///
    /// With fewer than `window` bars the average covers the available
    /// subset rather than dividing by the full window size (which would
    /// silently deflate the result). An empty series is an error.
    pub fn moving_average(
        &self,
        series: &TimeSeries,
        symbol: &str,
        window: usize,
    ) -> Result<f64, CoreError> {
        let closes = series.recent_closes(window);
        if closes.is_empty() {
            return Err(CoreError::NoHistoricalData(symbol.to_string()));
        }
        Ok(closes.iter().sum::<f64>() / closes.len() as f64)
    }

    /// Classify a daily percent change.
    ///
    /// Comparisons are strict, so boundary values fall into the weaker
    /// category: exactly +5.0 is `Bullish`, exactly -2.0 is `Neutral`.
    pub fn sentiment(&self, daily_change_percent: f64) -> Sentiment {
        if daily_change_percent > 5.0 {
            Sentiment::VeryBullish
        } else if daily_change_percent > 2.0 {
            Sentiment::Bullish
        } else if daily_change_percent < -5.0 {
            Sentiment::VeryBearish
        } else if daily_change_percent < -2.0 {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    /// units × purchase_price, rounded to 2 decimal places.
    pub fn investment_value(&self, units: f64, purchase_price: f64) -> f64 {
        round_2dp(units * purchase_price)
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 2 decimal places (display precision for monetary values).
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
