use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::series::TimeSeries;

/// Qualitative read of the day's percent change.
///
/// Thresholds are strict: exactly +5% is still `Bullish`, exactly -5%
/// is still `Bearish`, and the band [-2, +2] is `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    VeryBearish,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::VeryBullish => write!(f, "Very Bullish"),
            Sentiment::Bullish => write!(f, "Bullish"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Bearish => write!(f, "Bearish"),
            Sentiment::VeryBearish => write!(f, "Very Bearish"),
        }
    }
}

/// Which path produced a report. The frontend derives its banners from
/// this: a demo warning for `Demo`, a quota indicator for `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    /// Served from the in-memory cache within its TTL
    Cached,
    /// Fetched from the quote API this submission
    Live,
    /// Fabricated by the synthetic generator
    Demo,
}

/// Everything the presentation layer needs to render one position check.
///
/// The core computes all the numbers — the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Latest traded price
    pub current_price: f64,

    /// Close on the purchase date's most recent trading day
    pub purchase_price: f64,

    /// Units held, echoed from the query
    pub units: f64,

    /// units × purchase_price, rounded to 2 decimal places
    pub investment_value: f64,

    /// Day-over-day change in percent
    pub daily_change_percent: f64,

    /// Mean of the 7 most recent closes
    pub avg_7: f64,

    /// Mean of the 30 most recent closes
    pub avg_30: f64,

    /// Qualitative classification of `daily_change_percent`
    pub sentiment: Sentiment,

    /// The (real or synthetic) daily history backing the chart
    pub series: TimeSeries,
}

/// The full result of one submission: the report plus how it was obtained.
///
/// `fetch_error` and `origin` are independent: a failed live fetch yields
/// `origin == Demo` AND a populated `fetch_error` — the user sees synthetic
/// numbers and is told why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionOutcome {
    pub report: PositionReport,

    /// Which data path produced the report
    pub origin: DataOrigin,

    /// Live-fetch attempts consumed so far this session
    pub calls_used: u32,

    /// Session ceiling on live-fetch attempts
    pub call_limit: u32,

    /// Error text from a failed live fetch, when the report fell back to demo
    pub fetch_error: Option<String>,
}

impl PositionOutcome {
    /// Serialize the full outcome as JSON for the presentation layer.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
