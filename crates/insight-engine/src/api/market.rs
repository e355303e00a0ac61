//! Yahoo Finance market data client

use crate::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use insight_core::{MarketDataProvider, PricePoint};
use time::OffsetDateTime;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

/// Market data client backed by Yahoo Finance
pub struct YahooMarketClient {}

impl YahooMarketClient {
    /// Create a new Yahoo market data client
    pub fn new() -> Self {
        Self {}
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| EngineError::MarketDataError(e.to_string()))?;

        // Convert chrono NaiveDate to time OffsetDateTime
        let start_ts = start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EngineError::MarketDataError("invalid start date".to_string()))?
            .and_utc()
            .timestamp();
        let end_ts = end
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| EngineError::MarketDataError("invalid end date".to_string()))?
            .and_utc()
            .timestamp();

        let start_odt = OffsetDateTime::from_unix_timestamp(start_ts)
            .map_err(|e| EngineError::MarketDataError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end_ts)
            .map_err(|e| EngineError::MarketDataError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| EngineError::MarketDataError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| EngineError::MarketDataError(e.to_string()))?;

        let mut points: Vec<PricePoint> = Vec::with_capacity(quotes.len());
        for quote in &quotes {
            let Some(timestamp) = chrono::DateTime::from_timestamp(quote.timestamp as i64, 0)
            else {
                continue;
            };
            let date = timestamp.date_naive();
            // Yahoo occasionally repeats the last trading day
            if points.last().is_some_and(|p: &PricePoint| p.date == date) {
                continue;
            }
            points.push(PricePoint {
                date,
                close: quote.close,
            });
        }

        Ok(points)
    }
}

impl Default for YahooMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketClient {
    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn price_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> insight_core::Result<Vec<PricePoint>> {
        let points = self.fetch_history(symbol, start, end).await?;
        debug!("Fetched {} price points", points.len());
        Ok(points)
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn probe_symbol(&self, symbol: &str) -> bool {
        let Ok(provider) = yahoo::YahooConnector::new() else {
            return false;
        };

        match provider.get_latest_quotes(symbol, "1d").await {
            Ok(response) => response.quotes().map(|q| !q.is_empty()).unwrap_or(false),
            Err(_) => false,
        }
    }
}
