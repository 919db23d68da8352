use serde::{Deserialize, Serialize};

/// Snapshot of a symbol's current market state, as returned by the
/// quote endpoint. Produced fresh per fetch and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Latest traded price
    pub price: f64,

    /// Day-over-day change in percent (e.g., 1.23 for +1.23%)
    pub change_percent: f64,
}
