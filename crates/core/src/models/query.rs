use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A validated position lookup request: which symbol, bought when, how many.
///
/// Construction is the validation boundary for form input. A query that
/// exists is well-formed — downstream code never re-checks these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionQuery {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Purchase date — never after `today`
    pub purchase_date: NaiveDate,

    /// Number of units held (strictly positive)
    pub units: f64,
}

impl PositionQuery {
    /// Validate raw form input against `today`.
    ///
    /// Rejects a blank symbol, a purchase date in the future (the form's
    /// date picker is capped at today), and units that are missing,
    /// non-finite, zero, or negative.
    pub fn new(
        symbol: &str,
        purchase_date: NaiveDate,
        units: f64,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Symbol must not be empty".to_string(),
            ));
        }
        if purchase_date > today {
            return Err(CoreError::ValidationError(format!(
                "Purchase date {purchase_date} is in the future (today is {today})"
            )));
        }
        if !units.is_finite() || units <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Units must be a positive number, got {units}"
            )));
        }
        Ok(Self {
            symbol: trimmed.to_uppercase(),
            purchase_date,
            units,
        })
    }

    /// Cache key for this query: one entry per (symbol, purchase date).
    pub fn cache_key(&self) -> (String, NaiveDate) {
        (self.symbol.clone(), self.purchase_date)
    }
}
