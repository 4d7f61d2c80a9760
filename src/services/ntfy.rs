use async_trait::async_trait;
use reqwest::header::{HeaderValue, InvalidHeaderValue};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_NTFY_BASE_URL: &str = "https://ntfy.sh";

/// ntfy message priority, sent in the `Priority` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Min,
    Low,
    #[default]
    Default,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Min => "min",
            Priority::Low => "low",
            Priority::Default => "default",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub click_url: Option<String>,
    pub priority: Priority,
    /// Comma-separated ntfy tags; emoji short codes become icons
    pub tags: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No topic configured, nothing was sent
    Skipped,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid value for {header} header: {source}")]
    InvalidHeader {
        header: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error("failed to deliver notification: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        topic: &str,
        notification: &Notification,
    ) -> Result<Delivery, NotifyError>;
}

/// Publishes notifications to an ntfy server with one POST per message.
#[derive(Clone)]
pub struct NtfyNotifier {
    client: Client,
    base_url: String,
}

impl NtfyNotifier {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn topic_url(&self, topic: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), topic)
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn notify(
        &self,
        topic: &str,
        notification: &Notification,
    ) -> Result<Delivery, NotifyError> {
        let topic = topic.trim();
        if topic.is_empty() {
            tracing::warn!("ntfy topic not configured, skipping notification");
            return Ok(Delivery::Skipped);
        }

        // Title goes out as raw UTF-8 bytes; ntfy decodes it as such
        let title = header_value("Title", &notification.title)?;
        let click = header_value("Click", notification.click_url.as_deref().unwrap_or(""))?;
        let tags = header_value("Tags", &notification.tags)?;

        // Status is not checked: ntfy is fire-and-forget
        self.client
            .post(self.topic_url(topic))
            .header("Title", title)
            .header("Click", click)
            .header("Priority", notification.priority.as_str())
            .header("Tags", tags)
            .body(notification.message.clone().into_bytes())
            .send()
            .await?;

        tracing::info!("Notification sent to topic '{}'", topic);
        Ok(Delivery::Sent)
    }
}

/// Stand-in used when no ntfy client is available; every message is skipped.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(
        &self,
        _topic: &str,
        notification: &Notification,
    ) -> Result<Delivery, NotifyError> {
        tracing::warn!(
            "Notifications disabled, skipping '{}'",
            notification.title
        );
        Ok(Delivery::Skipped)
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, NotifyError> {
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|source| NotifyError::InvalidHeader { header, source })
}

/// Send a notification, logging and swallowing any failure.
///
/// Returns `None` when delivery failed.
pub async fn dispatch(
    notifier: &dyn Notifier,
    topic: &str,
    notification: &Notification,
) -> Option<Delivery> {
    match notifier.notify(topic, notification).await {
        Ok(delivery) => Some(delivery),
        Err(e) => {
            tracing::error!(
                "Failed to send notification '{}': {}",
                notification.title,
                e
            );
            None
        }
    }
}
