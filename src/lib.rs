//! Ride wait-time monitoring service.
//!
//! Polls a park's queue-times feed on a fixed interval and sends a Slack
//! alert when a watched coaster or thrill ride closes, reopens, or posts a
//! new wait time at or under its configured threshold.

pub mod alert;
pub mod api;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod notify;
pub mod scheduler;
pub mod thresholds;
