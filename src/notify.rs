/// Notification delivery.
///
/// Each cycle hands one composed block to a `Notifier`. The production
/// notifier echoes the block to the console and posts it to a Slack
/// incoming webhook. A missing webhook is a configuration error, never a
/// silent no-op.

use crate::logging::{self, Component};
use crate::model::MonitorError;
use async_trait::async_trait;
use serde::Serialize;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers one block. `message` may be empty or span several lines.
    async fn deliver(&self, message: &str) -> Result<(), MonitorError>;
}

/// Slack incoming-webhook payload.
#[derive(Debug, Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    hook_url: Option<String>,
}

impl WebhookNotifier {
    /// Builds a notifier for `hook_url`, failing if it is missing or blank.
    pub fn from_config(hook_url: Option<&str>) -> Result<Self, MonitorError> {
        let notifier = Self {
            client: reqwest::Client::new(),
            hook_url: hook_url.map(String::from),
        };
        notifier.hook_url()?;
        Ok(notifier)
    }

    fn hook_url(&self) -> Result<&str, MonitorError> {
        match self.hook_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(MonitorError::Configuration("Slack hook URL is missing".to_string())),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn deliver(&self, message: &str) -> Result<(), MonitorError> {
        println!("{}", message);

        let url = self.hook_url()?;

        // Slack rejects an empty `text` with 400 no_text.
        if message.is_empty() {
            logging::debug(Component::Notify, None, "Nothing to report this cycle");
            return Ok(());
        }

        let response = self
            .client
            .post(url)
            .json(&SlackMessage { text: message })
            .send()
            .await
            .map_err(|e| MonitorError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MonitorError::HttpError(response.status().as_u16()));
        }

        logging::debug(
            Component::Notify,
            None,
            &format!("Delivered {} line(s) to webhook", message.lines().count()),
        );
        Ok(())
    }
}
