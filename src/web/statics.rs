//! Static asset serving with a directory-traversal guard.

use std::path::{Component, Path as FsPath, PathBuf};

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, warn};

use super::AppState;

/// GET /static/*path
pub async fn serve(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    match load_asset(&state.static_root, &path).await {
        Some(asset) => {
            let cache_control = match state.cache_max_age {
                Some(secs) => format!("public, max-age={secs}"),
                None => "no-store".to_string(),
            };
            (
                [
                    (header::CONTENT_TYPE, asset.content_type.to_string()),
                    (header::CONTENT_LENGTH, asset.bytes.len().to_string()),
                    (header::CACHE_CONTROL, cache_control),
                ],
                asset.bytes,
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

struct Asset {
    bytes: Vec<u8>,
    content_type: &'static str,
}

/// Resolves `rel` inside `root`, refusing anything that escapes it.
///
/// Both sides are canonicalized before the containment check; `..` segments
/// and symlinks are resolved away before the prefix comparison.
async fn load_asset(root: &FsPath, rel: &str) -> Option<Asset> {
    let escape_attempt = FsPath::new(rel)
        .components()
        .any(|c| matches!(c, Component::ParentDir));

    let root = tokio::fs::canonicalize(root).await.ok()?;
    let resolved = match tokio::fs::canonicalize(root.join(rel)).await {
        Ok(resolved) => resolved,
        Err(e) => {
            if escape_attempt {
                warn!(path = rel, "Rejected static path escaping the asset root");
            } else {
                debug!(path = rel, error = %e, "Static asset not found");
            }
            return None;
        }
    };
    if !resolved.starts_with(&root) {
        warn!(path = rel, "Rejected static path escaping the asset root");
        return None;
    }

    let metadata = tokio::fs::metadata(&resolved).await.ok()?;
    if !metadata.is_file() {
        return None;
    }

    let bytes = tokio::fs::read(&resolved).await.ok()?;
    Some(Asset {
        content_type: content_type_for(&resolved),
        bytes,
    })
}

fn content_type_for(path: &FsPath) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// GET /debug/static
///
/// Quick sanity view of the shipped assets: size and a leading byte sample,
/// or MISSING when a file is absent from the root.
pub async fn debug_listing(State(state): State<AppState>) -> Html<String> {
    let mut out = Vec::new();
    for name in ["app.js", "styles.css"] {
        let path: PathBuf = state.static_root.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let head = String::from_utf8_lossy(&bytes[..bytes.len().min(100)]).into_owned();
                out.push(format!("{name}: {} bytes\n{head:?}\n", bytes.len()));
            }
            Err(_) => out.push(format!("{name}: MISSING\n")),
        }
    }
    Html(format!("<pre>{}</pre>", out.join("\n")))
}
