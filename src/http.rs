//! HTTP sidecar: static client assets and the Prometheus metrics endpoint.
//!
//! Runs on a separate tokio task and its own listen address, next to the
//! WebSocket gateway.

use crate::config::HttpConfig;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use std::path::{Component, Path};
use std::sync::Arc;

/// Request path that maps to the client entry page.
const INDEX_PATH: &str = "/index.html";

/// Outcome of looking up a static asset.
#[derive(Debug, PartialEq, Eq)]
pub enum AssetReply {
    /// File contents with the content type to serve them as.
    Found {
        body: Vec<u8>,
        content_type: &'static str,
    },
    /// Unknown path; send the client back to the entry page.
    Redirect,
    /// The entry page itself could not be read.
    LoadError { path: String },
}

impl IntoResponse for AssetReply {
    fn into_response(self) -> Response {
        match self {
            Self::Found { body, content_type } => (
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                ],
                body,
            )
                .into_response(),
            Self::Redirect => (
                StatusCode::FOUND,
                [(header::LOCATION, "/"), (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            )
                .into_response(),
            Self::LoadError { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
                format!("Error loading {path}"),
            )
                .into_response(),
        }
    }
}

/// Content type for a request path, chosen by its extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = Path::new(path).extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "html" => "text/html",
        "js" => "text/javascript",
        "css" => "text/css",
        "json" => "application/json",
        _ => "text/plain",
    }
}

/// Look up `request_path` under `root`.
///
/// `/` maps to `/index.html`. Paths that would leave `root` are treated as
/// missing.
pub async fn load_asset(root: &Path, request_path: &str) -> AssetReply {
    let path = if request_path == "/" { INDEX_PATH } else { request_path };
    let relative = path.trim_start_matches('/');
    let contained = !relative.is_empty()
        && Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

    if contained {
        match tokio::fs::read(root.join(relative)).await {
            Ok(body) => {
                return AssetReply::Found {
                    body,
                    content_type: content_type_for(path),
                };
            }
            Err(e) => tracing::debug!(path, error = %e, "Asset not found"),
        }
    }

    if path == INDEX_PATH {
        tracing::error!(root = %root.display(), "Failed to load client entry page");
        AssetReply::LoadError { path: path.to_string() }
    } else {
        AssetReply::Redirect
    }
}

/// Handler for GET /metrics - returns Prometheus metrics in text format.
async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

/// Build the sidecar router for `config`.
pub fn router(config: &HttpConfig) -> Router {
    let mut app = Router::new();
    if config.metrics {
        app = app.route("/metrics", get(metrics_handler));
    }
    if let Some(dir) = &config.assets_dir {
        let root = Arc::new(dir.clone());
        app = app.fallback(move |uri: Uri| {
            let root = Arc::clone(&root);
            async move { load_asset(&root, uri.path()).await }
        });
    }
    app
}

/// Run the HTTP sidecar.
///
/// This is a long-running task that should be spawned in the background.
pub async fn run_http_server(config: HttpConfig) {
    let app = router(&config);
    let addr = config.address;

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind HTTP server on {}: {}", addr, e);
            return;
        }
    };
    tracing::info!("HTTP server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("HTTP server error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn assets() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html>hi</html>").unwrap();
        fs::create_dir(dir.path().join("js")).unwrap();
        fs::write(dir.path().join("js/app.js"), "console.log(1)").unwrap();
        fs::write(dir.path().join("model.glb"), [0u8, 1, 2]).unwrap();
        dir
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("/index.html"), "text/html");
        assert_eq!(content_type_for("/js/app.js"), "text/javascript");
        assert_eq!(content_type_for("/style.css"), "text/css");
        assert_eq!(content_type_for("/data.json"), "application/json");
        assert_eq!(content_type_for("/model.glb"), "text/plain");
        assert_eq!(content_type_for("/README"), "text/plain");
    }

    #[tokio::test]
    async fn root_serves_index() {
        let dir = assets();
        let reply = load_asset(dir.path(), "/").await;
        assert_eq!(
            reply,
            AssetReply::Found {
                body: b"<html>hi</html>".to_vec(),
                content_type: "text/html"
            }
        );
    }

    #[tokio::test]
    async fn nested_file_is_served() {
        let dir = assets();
        match load_asset(dir.path(), "/js/app.js").await {
            AssetReply::Found { body, content_type } => {
                assert_eq!(body, b"console.log(1)");
                assert_eq!(content_type, "text/javascript");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_redirects_home() {
        let dir = assets();
        assert_eq!(load_asset(dir.path(), "/nope.js").await, AssetReply::Redirect);
    }

    #[tokio::test]
    async fn traversal_is_treated_as_missing() {
        let dir = assets();
        let inner = dir.path().join("public");
        fs::create_dir(&inner).unwrap();
        assert_eq!(load_asset(&inner, "/../index.html").await, AssetReply::Redirect);
    }

    #[tokio::test]
    async fn missing_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_asset(dir.path(), "/").await,
            AssetReply::LoadError {
                path: "/index.html".into()
            }
        );
    }
}
