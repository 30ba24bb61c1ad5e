//! Upload of the report payload.

use std::time::Duration;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Destination for a serialized report.
pub trait ReportSink {
    /// Deliver `payload` and return the receiver's response text.
    fn send(&self, payload: &[u8]) -> AppResult<String>;
}

/// Posts the payload as JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpSink {
    /// Build a sink with connect and request timeouts.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(HttpSink {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl ReportSink for HttpSink {
    fn send(&self, payload: &[u8]) -> AppResult<String> {
        info!("Uploading {} bytes to {}", payload.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload.to_vec())
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(AppError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Upload accepted with status {}", status);
        Ok(body)
    }
}
