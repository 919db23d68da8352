use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::Quote;
use crate::models::series::{DailyBar, TimeSeries};
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_NAME: &str = "Alpha Vantage";

/// Alpha Vantage API provider for stock quotes and daily history.
///
/// - **Free tier**: heavily rate limited; the payload carries a "Note"
///   field when the provider throttles, even on HTTP 200.
/// - **Requires**: API key.
/// - **Endpoints used**: GLOBAL_QUOTE (current price + change percent)
///   and TIME_SERIES_DAILY (compact, last ~100 trading days).
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

#[derive(Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

#[derive(Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyData>>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

#[derive(Deserialize)]
struct DailyData {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_position_data(
        &self,
        symbol: &str,
    ) -> Result<(Quote, TimeSeries), CoreError> {
        // Quote first: an invalid symbol fails here before the series
        // call spends another request.
        let quote = self.fetch_quote(symbol).await?;
        let series = self.fetch_daily_series(symbol).await?;
        Ok((quote, series))
    }
}

impl AlphaVantageProvider {
    /// Fetch the current quote for a symbol.
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let resp: GlobalQuoteResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", &symbol.to_uppercase()),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse quote for {symbol}: {e}"),
            })?;

        if resp.note.is_some() {
            return Err(CoreError::ProviderRateLimited {
                provider: PROVIDER_NAME.into(),
            });
        }

        let quote = resp
            .global_quote
            .ok_or_else(|| CoreError::InvalidSymbol(symbol.to_string()))?;

        let price = quote
            .price
            .as_deref()
            .and_then(|p| p.parse::<f64>().ok())
            .ok_or_else(|| CoreError::InvalidSymbol(symbol.to_string()))?;

        // The change-percent field arrives as e.g. "1.2345%".
        let change_percent = quote
            .change_percent
            .as_deref()
            .map(parse_percent)
            .transpose()
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Invalid change percent for {symbol}: {e}"),
            })?
            .unwrap_or(0.0);

        Ok(Quote {
            symbol: symbol.to_uppercase(),
            price,
            change_percent,
        })
    }

    /// Fetch the daily time series for a symbol.
    /// Returns compact data (last ~100 trading days).
    async fn fetch_daily_series(&self, symbol: &str) -> Result<TimeSeries, CoreError> {
        let resp: TimeSeriesResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", &symbol.to_uppercase()),
                ("outputsize", "compact"),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse time series for {symbol}: {e}"),
            })?;

        if resp.note.is_some() {
            return Err(CoreError::ProviderRateLimited {
                provider: PROVIDER_NAME.into(),
            });
        }

        let raw = resp
            .time_series
            .ok_or_else(|| CoreError::NoHistoricalData(symbol.to_string()))?;

        let mut series = TimeSeries::new();
        for (date_str, data) in &raw {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                CoreError::Api {
                    provider: PROVIDER_NAME.into(),
                    message: format!("Invalid date key '{date_str}' for {symbol}: {e}"),
                }
            })?;
            series.insert(date, parse_bar(symbol, data)?);
        }

        if series.is_empty() {
            return Err(CoreError::NoHistoricalData(symbol.to_string()));
        }

        Ok(series)
    }
}

/// Parse a "1.2345%"-style field into its numeric value.
fn parse_percent(raw: &str) -> Result<f64, std::num::ParseFloatError> {
    raw.trim().trim_end_matches('%').parse::<f64>()
}

fn parse_bar(symbol: &str, data: &DailyData) -> Result<DailyBar, CoreError> {
    let field = |name: &str, value: &str| -> Result<f64, CoreError> {
        value.parse::<f64>().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Invalid {name} value for {symbol}: {e}"),
        })
    };
    Ok(DailyBar {
        open: field("open", &data.open)?,
        high: field("high", &data.high)?,
        low: field("low", &data.low)?,
        close: field("close", &data.close)?,
        volume: data.volume.parse::<u64>().map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Invalid volume value for {symbol}: {e}"),
        })?,
    })
}
