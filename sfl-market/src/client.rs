//! HTTP client for the sfl.world price and exchange endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::error::MarketError;
use crate::models::{ExchangeRates, PriceTable};

pub const PRICES_API_URL: &str = "https://sfl.world/api/v1/prices";
pub const EXCHANGE_API_URL: &str = "https://sfl.world/api/v1/exchange";

/// Source of market data. [`SflWorldClient`] talks HTTP; tests plug in fixed tables.
#[async_trait]
pub trait MarketClient: Send + Sync {
    async fn fetch_prices(&self) -> Result<PriceTable, MarketError>;
    async fn fetch_exchange_rates(&self) -> Result<ExchangeRates, MarketError>;
}

/// Endpoints, timeout and retry policy for [`SflWorldClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub prices_url: String,
    pub exchange_url: String,
    pub timeout: Duration,
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for every further attempt. Zero disables sleeping.
    pub backoff_base: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            prices_url: PRICES_API_URL.to_string(),
            exchange_url: EXCHANGE_API_URL.to_string(),
            timeout: Duration::from_secs(5),
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

/// sfl.world API client. Every failure (connect, timeout, status, bad JSON) is retried with exponential backoff.
#[derive(Debug, Clone)]
pub struct SflWorldClient {
    http: Client,
    config: ClientConfig,
}

impl SflWorldClient {
    pub fn new(config: ClientConfig) -> Result<Self, MarketError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MarketError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Delay after the given failed attempt (1-based): `base * 2^(attempt-1)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.config.backoff_base.saturating_mul(factor)
    }

    async fn get_json(&self, url: &str) -> Result<Value, MarketError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt < max_attempts => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Market request failed, retrying"
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<Value, MarketError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

#[async_trait]
impl MarketClient for SflWorldClient {
    #[instrument(skip(self))]
    async fn fetch_prices(&self) -> Result<PriceTable, MarketError> {
        info!(url = %self.config.prices_url, "step: fetching item prices");
        let body = self.get_json(&self.config.prices_url).await?;
        let table = PriceTable::from_response(&body)?;
        debug!(items = table.len(), "Fetched item prices");
        Ok(table)
    }

    #[instrument(skip(self))]
    async fn fetch_exchange_rates(&self) -> Result<ExchangeRates, MarketError> {
        info!(url = %self.config.exchange_url, "step: fetching exchange rates");
        let body = self.get_json(&self.config.exchange_url).await?;
        let rates = ExchangeRates::from_response(&body)?;
        debug!(sfl_usd = ?rates.sfl_usd(), "Fetched exchange rates");
        Ok(rates)
    }
}
