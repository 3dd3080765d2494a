//! Completion notification delivery.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use copyforge_core::{Error, Result};

/// A completion message addressed to the order's contact.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Contact identity (email, phone, messenger handle).
    pub contact: String,
    pub title: String,
    pub message: String,
}

/// Delivery channel for completion notifications. Delivery is best-effort:
/// the workflow logs failures and never fails an order over them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<()>;
}

/// Logs notifications instead of delivering them. Default channel when no
/// webhook is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        info!(
            "Notification for {}: {} / {}",
            notification.contact, notification.title, notification.message
        );
        Ok(())
    }
}

/// Posts notifications as JSON to a configured webhook.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .map_err(|e| Error::Notification(format!("webhook request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Notification(format!(
                "webhook returned status {status}"
            )));
        }
        Ok(())
    }
}
