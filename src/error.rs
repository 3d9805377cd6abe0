use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dispatcher::SpawnError;
use crate::types::Envelope;

/// Failures of a start request.
///
/// Every variant answers with an [`Envelope`], never a bare error string.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("{}", .0.value)]
    Validation(Envelope),
    #[error("failed to read start request body: {0}")]
    Body(#[from] axum::Error),
    #[error("failed to decode start configuration: {0}")]
    Payload(#[from] serde_json::Error),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

impl ControlError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Body(_) | Self::Payload(_) => StatusCode::BAD_REQUEST,
            Self::Spawn(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ControlError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = match self {
            Self::Validation(envelope) => envelope,
            other => Envelope::failure(other.to_string()),
        };
        (status, envelope).into_response()
    }
}
