// --- File: crates/bookify_booking/src/webhook.rs ---
//! Webhook delivery for booking notifications.

use bookify_common::http::HTTP_CLIENT;
use bookify_common::services::{BoxFuture, NotificationSink};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook endpoint returned status {0}")]
    Status(u16),
}

/// Posts JSON payloads to one configured endpoint. Whether a failed
/// delivery matters is the caller's decision.
pub struct WebhookSink {
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl NotificationSink for WebhookSink {
    type Error = WebhookError;

    fn post(&self, payload: serde_json::Value) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            debug!("Delivering webhook notification to {}", self.url);
            let response = HTTP_CLIENT.post(&self.url).json(&payload).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(WebhookError::Status(status.as_u16()));
            }
            Ok(())
        })
    }
}
