//! Rate tables and the rate-resolution contract.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::warn;

/// Units of a currency per 1 USD, keyed by 3-letter uppercase code.
pub type RateTable = HashMap<String, f64>;

pub const ATTRIBUTION: &str =
    "Exchange rates provided by ExchangeRate-API (https://www.exchangerate-api.com)";

// Built-in table substituted whenever the live source is unavailable.
static FALLBACK_RATES: Lazy<RateTable> = Lazy::new(|| {
    [
        ("USD", 1.0),
        ("EUR", 0.94),
        ("GBP", 0.82),
        ("INR", 82.62),
        ("AUD", 1.43),
        ("CAD", 1.36),
        ("SGD", 1.35),
        ("CHF", 0.91),
        ("MYR", 4.47),
        ("JPY", 134.08),
        ("CNY", 6.92),
        ("SAR", 3.75),
        ("NZD", 1.51),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
});

/// A fresh copy of the built-in fallback table.
pub fn fallback_rates() -> RateTable {
    FALLBACK_RATES.clone()
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches a USD-relative rate table for `base` from an external source.
    async fn fetch_rates(&self, base: &str) -> Result<RateTable>;
}

/// A rate table plus the flag telling which source produced it.
#[derive(Debug, Clone)]
pub struct RateResolution {
    pub rates: RateTable,
    pub live: bool,
}

/// Resolves rates for `base`, substituting the fallback table on any failure.
///
/// Fetch errors never reach the caller; `live == false` is the only signal
/// that the upstream was unavailable.
pub async fn resolve_rates(source: &dyn RateSource, base: &str) -> RateResolution {
    match source.fetch_rates(base).await {
        Ok(rates) => RateResolution { rates, live: true },
        Err(e) => {
            warn!(base, error = %e, "Rate fetch failed, using fallback table");
            RateResolution {
                rates: fallback_rates(),
                live: false,
            }
        }
    }
}
