use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single point on the closing-price line chart.
///
/// The core generates these — the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// The trading date for this point
    pub date: NaiveDate,

    /// Closing price on that date
    pub close: f64,
}
