use axum::Json;
use axum::response::{IntoResponse, Response};

/// `Envelope` Payload
///
/// Every response body this service produces has this shape,
/// whether it answers a start request or a status query.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Whether the requested operation succeeded
    pub success: bool,
    /// "OK", the writer state, or a human readable explanation
    pub value: String,
}

impl Envelope {
    #[must_use]
    pub fn success(value: impl Into<String>) -> Self {
        Self {
            success: true,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn failure(value: impl Into<String>) -> Self {
        Self {
            success: false,
            value: value.into(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
