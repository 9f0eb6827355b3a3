//! Ride state tracking across polling cycles.
//!
//! `RideStateTracker` remembers the last observation of every monitored ride
//! and turns each fresh batch into the ordered list of alerts to send.
//!
//! A tracker is not shared. One scheduling loop owns one tracker and runs
//! one cycle at a time; a second park needs a second tracker.

use super::transitions::{decide, RideAlert};
use crate::model::{Land, MonitorError, QueueTimesResponse, RideObservation, ThresholdMap, MONITORED_LANDS};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RideStateTracker {
    last_seen: HashMap<String, RideObservation>,
}

impl RideStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates one batch and returns the notification lines, in feed order.
    ///
    /// Fails with `EmptyFeed` when `lands` is empty and with
    /// `NoQualifyingRides` when no monitored land has rides. Neither failure
    /// touches tracked state. Once validation passes every monitored ride is
    /// committed, whether or not it produced a line.
    pub fn evaluate(
        &mut self,
        lands: &[Land],
        thresholds: &ThresholdMap,
    ) -> Result<Vec<String>, MonitorError> {
        let alerts = self.evaluate_alerts(lands, thresholds)?;
        Ok(alerts.iter().map(ToString::to_string).collect())
    }

    /// Same as `evaluate` for a whole feed body, where `None` is an absent body.
    pub fn evaluate_feed(
        &mut self,
        feed: Option<&QueueTimesResponse>,
        thresholds: &ThresholdMap,
    ) -> Result<Vec<String>, MonitorError> {
        match feed {
            Some(feed) => self.evaluate(&feed.lands, thresholds),
            None => Err(MonitorError::EmptyFeed),
        }
    }

    /// Structured form of `evaluate`.
    pub fn evaluate_alerts(
        &mut self,
        lands: &[Land],
        thresholds: &ThresholdMap,
    ) -> Result<Vec<RideAlert>, MonitorError> {
        if lands.is_empty() {
            return Err(MonitorError::EmptyFeed);
        }

        let rides = monitored_rides(lands);
        if rides.is_empty() {
            return Err(MonitorError::NoQualifyingRides);
        }

        let mut alerts = Vec::new();
        for ride in rides {
            let threshold = thresholds.get(&ride.name).copied().flatten();
            if let Some(threshold) = threshold {
                let prior = self.last_seen.get(&ride.name);
                if let Some(alert) = decide(ride, prior, threshold) {
                    alerts.push(alert);
                }
            }
            self.last_seen.insert(ride.name.clone(), ride.clone());
        }

        Ok(alerts)
    }

    /// The last committed observation for `ride_name`.
    pub fn last_observation(&self, ride_name: &str) -> Option<&RideObservation> {
        self.last_seen.get(ride_name)
    }

    /// Number of distinct rides seen so far.
    pub fn tracked_rides(&self) -> usize {
        self.last_seen.len()
    }
}

/// Rides from the monitored lands, in land order then ride order.
fn monitored_rides(lands: &[Land]) -> Vec<&RideObservation> {
    lands
        .iter()
        .filter(|land| MONITORED_LANDS.contains(&land.name.as_str()))
        .flat_map(|land| land.rides.iter())
        .collect()
}

/// Joins notification lines into the single block handed to the notifier.
pub fn compose_message(lines: &[String]) -> String {
    lines.join("\n")
}
