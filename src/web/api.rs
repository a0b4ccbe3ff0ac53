//! JSON endpoints for rate listing and conversion.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::core::convert::{ConversionRequest, ValidationError};
use crate::core::rates::{self, ATTRIBUTION, RateTable};

use super::AppState;

/// All rates are expressed relative to this currency.
pub const BASE_CURRENCY: &str = "USD";

#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub base: &'static str,
    pub rates: RateTable,
    pub live: bool,
    pub attribution: &'static str,
}

/// GET /api/rates
///
/// Always answers 200; an unreachable upstream is reported through
/// `live: false` with the fallback table in place of live data.
pub async fn rates(State(state): State<AppState>) -> Json<RatesResponse> {
    let resolution = rates::resolve_rates(state.rates.as_ref(), BASE_CURRENCY).await;
    Json(RatesResponse {
        base: BASE_CURRENCY,
        rates: resolution.rates,
        live: resolution.live,
        attribution: ATTRIBUTION,
    })
}

/// POST /api/convert
pub async fn convert(
    State(state): State<AppState>,
    Json(request): Json<ConversionRequest>,
) -> Response {
    let resolution = rates::resolve_rates(state.rates.as_ref(), BASE_CURRENCY).await;
    match crate::core::convert::convert(&request, &resolution.rates) {
        Ok(conversion) => Json(conversion).into_response(),
        Err(e) => e.into_response(),
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
