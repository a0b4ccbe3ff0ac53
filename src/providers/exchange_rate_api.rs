//! Live rate source backed by ExchangeRate-API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::core::rates::{RateSource, RateTable};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    /// Builds a provider whose client-wide timeout bounds the whole request.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("cambio/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: RateTable,
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base: {} URL: {}", e, base, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rates response for {}: {}", base, e))?;

        if data.rates.is_empty() {
            return Err(anyhow!("No rates found in response for base: {}", base));
        }
        // Zero, negative, and non-finite rates count as a malformed response.
        if let Some((code, rate)) = data.rates.iter().find(|(_, r)| !r.is_finite() || **r <= 0.0) {
            return Err(anyhow!("Invalid rate {} for currency {}", rate, code));
        }

        debug!("Fetched {} rates for base {}", data.rates.len(), base);
        Ok(data.rates)
    }
}
