use std::time::Duration;

use tracing::{debug, warn};

use crate::types::{Envelope, WriterStatus};

/// Operator guidance returned whenever the writer cannot be queried
pub const WRITER_NOT_RUNNING: &str = "\nWriter is not running. Please start it first using:\n      $ pco_rclient start <path/to/config.pco>.\n";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("writer status endpoint unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),
    #[error("Writer is not receiving. Current status: {0}.")]
    NotReady(String),
}

/// Queries the writer's REST status endpoint and reshapes the answer
/// into an [`Envelope`].
#[derive(Debug, Clone)]
pub struct StatusRelay {
    client: reqwest::Client,
    status_url: String,
}

impl StatusRelay {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(status_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            status_url: status_url.into(),
        })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// Fetch the writer status, treating any state other than
    /// `receiving` as an error.
    ///
    /// # Errors
    /// * `RelayError::Unavailable` on connection failure, timeout, non-2xx answer or malformed body
    /// * `RelayError::NotReady` if the writer answers with another state
    pub async fn query(&self) -> Result<WriterStatus, RelayError> {
        let status: WriterStatus = self
            .client
            .get(&self.status_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if status.is_receiving() {
            Ok(status)
        } else {
            Err(RelayError::NotReady(status.status))
        }
    }

    /// `GetStatus` Function
    ///
    /// Query the writer and reshape its answer for the caller. Failures are
    /// logged and never escape as errors.
    ///
    /// # Returns
    /// * `Envelope` - `receiving` on success, the not-ready state, or the
    ///   start-the-writer guidance when the writer cannot be queried
    pub async fn get_status(&self) -> Envelope {
        let result = self.query().await;
        if let Err(err) = &result {
            warn!(target: "writer_control::status_relay", url = %self.status_url, %err, "Writer status query failed");
        } else {
            debug!(target: "writer_control::status_relay", url = %self.status_url, "Writer is receiving");
        }
        translate(result)
    }
}

/// Map a status query outcome to the envelope returned to the caller.
///
/// Only a `receiving` writer is reported as a success.
#[must_use]
pub fn translate(result: Result<WriterStatus, RelayError>) -> Envelope {
    match result {
        Ok(status) if status.is_receiving() => Envelope::success(status.status),
        Ok(status) => Envelope::failure(RelayError::NotReady(status.status).to_string()),
        Err(RelayError::Unavailable(_)) => Envelope::failure(WRITER_NOT_RUNNING),
        Err(err @ RelayError::NotReady(_)) => Envelope::failure(err.to_string()),
    }
}
