use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::service::DiscoveryService;

/// Builds the discovery service HTTP surface.
pub fn router(service: Arc<DiscoveryService>) -> Router {
    Router::new()
        .route("/discover/new", get(handle_new_group))
        .route("/discover/dump", get(handle_dump))
        .route("/discover/:token", get(handle_fetch_group))
        .route("/discover/:token/register", post(handle_register_node))
        .layer(Extension(service))
}

/// GET /discover/new - creates a group and returns its token as plain text.
pub async fn handle_new_group(Extension(service): Extension<Arc<DiscoveryService>>) -> String {
    service.create_group()
}

/// GET /discover/dump - the full store as one JSON object, token to register.
pub async fn handle_dump(Extension(service): Extension<Arc<DiscoveryService>>) -> Response {
    match service.dump() {
        Ok(body) => json_body(StatusCode::OK, body),
        Err(e) => {
            tracing::error!("Failed to dump store: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// GET /discover/:token - the raw register stored under the token.
pub async fn handle_fetch_group(
    Extension(service): Extension<Arc<DiscoveryService>>,
    Path(token): Path<String>,
) -> Response {
    match service.fetch_group(&token) {
        Some(body) => json_body(StatusCode::OK, body),
        None => {
            tracing::debug!("Fetch for unknown group {}", token);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// POST /discover/:token/register - adds the posted node identity to the
/// group and returns the updated register.
pub async fn handle_register_node(
    Extension(service): Extension<Arc<DiscoveryService>>,
    Path(token): Path<String>,
    body: Bytes,
) -> Response {
    match service.register_node(&token, &body) {
        Ok(updated) => json_body(StatusCode::OK, updated),
        Err(e) => {
            tracing::error!("Failed to register node in group {}: {}", token, e);
            (e.status_code(), e.to_string()).into_response()
        }
    }
}

fn json_body(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
