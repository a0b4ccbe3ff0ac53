//! HTTP surface: JSON API, static assets, and the entry page.

pub mod api;
pub mod pages;
pub mod statics;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::rates::RateSource;

/// Shared handler context; all fields are immutable.
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<dyn RateSource>,
    pub static_root: PathBuf,
    pub cache_max_age: Option<u64>,
    pub asset_version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/api/rates", get(api::rates))
        .route("/api/convert", post(api::convert))
        .route("/static/*path", get(statics::serve))
        .route("/debug/static", get(statics::debug_listing))
        .with_state(state)
}
