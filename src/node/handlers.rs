use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    routing::post,
    Json, Router,
};

use super::protocol::{ENDPOINT_HEARTBEAT, ENDPOINT_REPLICATE};
use crate::registry::types::NodeInfo;

/// Builds the node-side HTTP surface.
pub fn router(identity: Arc<NodeInfo>) -> Router {
    Router::new()
        .route(ENDPOINT_HEARTBEAT, post(handle_heartbeat))
        .route(&format!("{}/:token", ENDPOINT_REPLICATE), post(handle_replicate))
        .layer(Extension(identity))
}

/// POST /heartbeat - acknowledges a probe with the responder's own identity.
///
/// The payload is logged but carries no business meaning; the receiving side
/// does no liveness bookkeeping of its own.
pub async fn handle_heartbeat(
    Extension(identity): Extension<Arc<NodeInfo>>,
    payload: Bytes,
) -> Json<NodeInfo> {
    tracing::debug!("Heartbeat received: {}", String::from_utf8_lossy(&payload));

    Json(identity.as_ref().clone())
}

/// POST /replicate/:token - placeholder acknowledgment; no replication is
/// performed.
pub async fn handle_replicate(Path(token): Path<String>) -> String {
    tracing::info!("Replication requested for group {}", token);

    format!("replication acknowledged for group {}", token)
}
