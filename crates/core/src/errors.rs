use thiserror::Error;

/// Unified error type for the entire stock-pulse-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation ────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    /// The provider itself signalled rate limiting inside an HTTP 200
    /// payload (Alpha Vantage's "Note" field). Distinct from the local
    /// call-quota ceiling, which never produces an error.
    #[error("Provider rate limit exceeded ({provider})")]
    ProviderRateLimited { provider: String },

    #[error("Invalid stock symbol or no quote data available: {0}")]
    InvalidSymbol(String),

    #[error("No historical data available for {0}")]
    NoHistoricalData(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("No price available for {symbol} on or before {date}")]
    PriceNotAvailable {
        symbol: String,
        date: String,
    },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
