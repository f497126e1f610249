use axum::http::StatusCode;
use thiserror::Error;

/// Failure taxonomy of the discovery group protocol.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No group exists under the requested token.
    #[error("unknown discovery group")]
    GroupNotFound,

    /// The register stored under the token is not valid JSON.
    #[error("stored register is malformed: {0}")]
    MalformedRegister(#[source] serde_json::Error),

    /// The node identity payload of a registration is not valid JSON.
    #[error("node info payload is malformed: {0}")]
    MalformedNodeInfo(#[source] serde_json::Error),

    /// The updated register could not be serialized.
    #[error("register serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl DiscoveryError {
    /// Status code this error surfaces as on the HTTP boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DiscoveryError::GroupNotFound => StatusCode::NOT_FOUND,
            DiscoveryError::MalformedRegister(_)
            | DiscoveryError::MalformedNodeInfo(_)
            | DiscoveryError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
