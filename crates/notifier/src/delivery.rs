//! Delivery client: POSTs a rendered summary to a Slack incoming webhook.
//!
//! One attempt per notification. Only `200 OK` counts as delivered; transport
//! errors and every other status are reported as failures without retry.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::error::NotifyError;

/// Wire payload accepted by Slack incoming webhooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    pub text: String,
}

/// Thin wrapper over a shared `reqwest::Client`.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    http: reqwest::Client,
}

impl DeliveryClient {
    /// Build a client. `None` keeps reqwest's default (no overall timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self, NotifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    pub async fn deliver(&self, webhook_url: &str, text: &str) -> Result<(), NotifyError> {
        let payload = serde_json::to_vec(&SlackMessage {
            text: text.to_string(),
        })?;

        let response = self
            .http
            .post(webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(NotifyError::Status(status)),
        }
    }
}
