//! Entry page rendering.

use axum::{extract::State, response::Html};

use super::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// GET /
///
/// Serves the converter page with `{{version}}` tokens replaced by the
/// configured asset version, so static asset URLs cache-bust on deploy.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(INDEX_TEMPLATE.replace("{{version}}", &state.asset_version))
}
