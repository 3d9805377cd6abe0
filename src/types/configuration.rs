use axum::body;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use crate::error::ControlError;

/// Keys every start request must carry.
///
/// The order is the writer's positional argument order.
pub const REQUIRED_KEYS: [&str; 9] = [
    "connection_address",
    "output_file",
    "n_frames",
    "user_id",
    "n_modules",
    "rest_api_port",
    "dataset_name",
    "max_frames_per_file",
    "statistics_monitor_address",
];

const START_CONFIG_BODY_LIMIT: usize = 64 * 1024;

/// `StartConfig` Payload
///
/// The JSON object posted to start the writer. Keys outside
/// [`REQUIRED_KEYS`] are kept but never read.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct StartConfig(Map<String, Value>);

impl StartConfig {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Render the value under `key` as a command line argument.
    ///
    /// Returns `None` when the key is absent or its value is neither
    /// a string nor a number.
    #[must_use]
    pub fn argument(&self, key: &str) -> Option<String> {
        self.get(key).and_then(argument_text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for StartConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Strings pass through untouched, numbers keep their JSON spelling.
#[must_use]
pub fn argument_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

// The body is decoded whatever its content type, clients post raw JSON.
impl<S> FromRequest<S> for StartConfig
where
    S: Send + Sync,
{
    type Rejection = ControlError;

    async fn from_request(req: Request, _: &S) -> Result<Self, Self::Rejection> {
        let bytes = body::to_bytes(req.into_body(), START_CONFIG_BODY_LIMIT).await?;
        let config: Self = serde_json::from_slice(&bytes)?;
        Ok(config)
    }
}
