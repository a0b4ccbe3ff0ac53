pub mod config;
pub mod core;
pub mod providers;
pub mod web;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::providers::ExchangeRateApiProvider;
use crate::providers::exchange_rate_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub async fn run(config: config::AppConfig) -> Result<()> {
    info!("Currency converter backend starting...");

    let (base_url, timeout_secs) = config
        .providers
        .exchange_rate
        .as_ref()
        .map_or((DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS), |p| {
            (p.base_url.as_str(), p.timeout_secs)
        });
    let provider = ExchangeRateApiProvider::new(base_url, Duration::from_secs(timeout_secs))?;

    let state = web::AppState {
        rates: Arc::new(provider),
        static_root: config.static_files.root.clone(),
        cache_max_age: config.static_files.cache_max_age,
        asset_version: config.asset_version.clone(),
    };
    let app = web::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!(listen = %addr, static_root = %config.static_files.root.display(), "Serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")?;

    Ok(())
}
