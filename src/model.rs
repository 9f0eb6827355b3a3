/// RideObservation, Land, QueueTimesResponse, ThresholdMap, MonitorError
///
/// Core data types for the ride wait-time monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic and no I/O, only types and their wire mappings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Land names
// ---------------------------------------------------------------------------

/// Feed land holding the park's roller coasters.
pub const LAND_COASTERS: &str = "Coasters";

/// Feed land holding the park's thrill rides.
pub const LAND_THRILL: &str = "Thrill";

/// Only rides in these lands are tracked. Every other land is ignored.
pub const MONITORED_LANDS: &[&str] = &[LAND_COASTERS, LAND_THRILL];

// ---------------------------------------------------------------------------
// Feed types
// ---------------------------------------------------------------------------

/// One ride's status at a point in time.
///
/// Corresponds to one entry in a land's `rides[]` array of the queue-times
/// `queue_times.json` response. `name` is the join key between cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideObservation {
    pub id: u32,
    pub name: String,
    pub is_open: bool,
    /// Minutes; only meaningful while `is_open`.
    #[serde(rename = "wait_time")]
    pub wait_minutes: u32,
    #[serde(rename = "last_updated")]
    pub observed_at: DateTime<Utc>,
}

/// A named grouping of rides as delivered by the feed ("Coasters", "Family", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Land {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub rides: Vec<RideObservation>,
}

/// Top-level body of one feed fetch.
///
/// Parks without lands report their rides in the top-level `rides` array.
/// Those are never monitored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueTimesResponse {
    #[serde(default)]
    pub lands: Vec<Land>,
    #[serde(default)]
    pub rides: Vec<RideObservation>,
}

// ---------------------------------------------------------------------------
// Threshold types
// ---------------------------------------------------------------------------

/// Ride name to maximum newsworthy wait time in minutes.
///
/// A ride missing from the map, or mapped to `None`, is still tracked but
/// never produces a notification.
pub type ThresholdMap = HashMap<String, Option<u32>>;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can abort a monitoring cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorError {
    /// The fetched batch was absent or had no lands.
    EmptyFeed,
    /// The batch had lands, but no rides in a monitored land.
    NoQualifyingRides,
    /// A required setting (feed address, webhook URL) is missing or invalid.
    Configuration(String),
    /// Non-2xx HTTP response from the feed or the webhook.
    HttpError(u16),
    /// The response body could not be deserialized.
    ParseError(String),
    /// The request never produced a response (DNS, connect, timeout).
    Transport(String),
    /// The cycle was cancelled while waiting on the feed.
    Cancelled,
}

impl std::fmt::Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::EmptyFeed => write!(f, "No Lands were found for this park"),
            MonitorError::NoQualifyingRides => {
                write!(f, "No Coasters or Thrill rides were found for this park")
            }
            MonitorError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            MonitorError::HttpError(code) => write!(f, "HTTP error: {}", code),
            MonitorError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            MonitorError::Transport(msg) => write!(f, "Transport error: {}", msg),
            MonitorError::Cancelled => write!(f, "Cycle cancelled"),
        }
    }
}

impl std::error::Error for MonitorError {}
