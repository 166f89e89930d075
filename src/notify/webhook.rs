//! Webhook delivery.
//!
//! One blocking JSON POST per card, with a fixed timeout. Failures are
//! reported, never retried.

use std::time::Duration;

use reqwest::blocking::Client;

use super::card::MessageCard;
use super::Notifier;
use crate::error::{EnvCheckError, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Posts message cards to a webhook URL.
pub struct WebhookClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookClient {
    /// Create a client with the default 60-second timeout.
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("envcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| EnvCheckError::Notification {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Notifier for WebhookClient {
    fn send(&self, card: &MessageCard) -> Result<()> {
        tracing::debug!("Posting '{}' card to webhook", card.summary);

        let response = self
            .client
            .post(&self.url)
            .json(card)
            .send()
            .map_err(|e| EnvCheckError::Notification {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EnvCheckError::Notification {
                message: format!("HTTP {} from webhook: {}", status, body.trim()),
            });
        }

        tracing::info!("Sent '{}' notification", card.summary);
        Ok(())
    }
}
