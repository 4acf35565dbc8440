//! Static handlers serving the API documentation from disk.
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use log::warn;
use std::path::Path;
use std::sync::Arc;

const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";
const YAML_CONTENT_TYPE: &str = "application/yaml";

async fn serve_file(path: &Path, content_type: &'static str) -> Response {
    match tokio::fs::read(path).await {
        Ok(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type)],
            contents,
        )
            .into_response(),
        Err(err) => {
            warn!("Failed to read {}: {}", path.display(), err);
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}

/// Serves the HTML documentation page.
pub async fn documentation(State(app_state): State<Arc<AppState>>) -> Response {
    serve_file(&app_state.config.docs_path, HTML_CONTENT_TYPE).await
}

/// Serves the API specification file.
pub async fn api_spec(State(app_state): State<Arc<AppState>>) -> Response {
    serve_file(&app_state.config.spec_path, YAML_CONTENT_TYPE).await
}
