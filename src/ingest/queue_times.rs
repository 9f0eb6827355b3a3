/// Queue-Times Feed Client
///
/// Retrieves live ride status (open/closed, posted wait time) for one park
/// from the queue-times.com JSON feed.
///
/// Feed: https://queue-times.com/parks/{park_id}/queue_times.json
/// The configured base address is the park URL, e.g.
/// `https://queue-times.com/parks/1/`.

use crate::model::{MonitorError, QueueTimesResponse};
use async_trait::async_trait;
use std::time::Duration;

const FEED_PATH: &str = "queue_times.json";

// ============================================================================
// Feed source
// ============================================================================

/// Supplies the raw park/land/ride observations for one cycle.
///
/// `Ok(None)` means the feed answered with an empty (`null`) body, which the
/// tracker treats the same as a park with no lands.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Option<QueueTimesResponse>, MonitorError>;
}

// ============================================================================
// HTTP client
// ============================================================================

pub struct QueueTimesClient {
    client: reqwest::Client,
    url: String,
}

impl QueueTimesClient {
    /// Builds a client for the park at `base_address`.
    ///
    /// A blank base address is a configuration error.
    pub fn new(base_address: &str, timeout: Duration) -> Result<Self, MonitorError> {
        if base_address.trim().is_empty() {
            return Err(MonitorError::Configuration(
                "queue_times.base_address is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: build_feed_url(base_address),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for QueueTimesClient {
    async fn fetch(&self) -> Result<Option<QueueTimesResponse>, MonitorError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MonitorError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MonitorError::HttpError(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MonitorError::Transport(e.to_string()))?;

        parse_feed(&body)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Joins the park base address and the feed path with exactly one slash.
pub fn build_feed_url(base_address: &str) -> String {
    format!("{}/{}", base_address.trim().trim_end_matches('/'), FEED_PATH)
}

/// Parses a raw feed body. A JSON `null` body yields `Ok(None)`.
pub fn parse_feed(body: &str) -> Result<Option<QueueTimesResponse>, MonitorError> {
    serde_json::from_str::<Option<QueueTimesResponse>>(body)
        .map_err(|e| MonitorError::ParseError(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
