//! Per-ride notification decisions.
//!
//! Compares one fresh observation against the prior one for the same ride
//! and decides which alert, if any, it warrants. Pure: no state, no I/O.

use crate::model::RideObservation;
use std::fmt;

/// What changed about a ride, in the order the rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// The ride is closed (first sighting) or went from open to closed.
    Closed,
    /// The ride went from closed to open at or under its threshold.
    Reopened,
    /// The wait time is at or under the threshold and is new.
    WaitTime,
}

/// An alert produced for a single ride in a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideAlert {
    pub ride: String,
    pub kind: AlertKind,
    pub wait_minutes: u32,
}

impl fmt::Display for RideAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AlertKind::Closed => write!(f, "{} is now closed", self.ride),
            AlertKind::Reopened => write!(
                f,
                "{} is now open with a {} minute wait",
                self.ride, self.wait_minutes
            ),
            AlertKind::WaitTime => {
                write!(f, "{} is now a {} minute wait", self.ride, self.wait_minutes)
            }
        }
    }
}

/// Decides the alert for `ride` given its prior observation and threshold.
///
/// First sighting (`prior` is `None`): closed rides announce the closure,
/// open rides announce their wait only at or under the threshold.
///
/// Steady state: the first matching rule wins.
///   1. open -> closed
///   2. closed -> open, at or under threshold
///   3. wait time changed, at or under threshold
///
/// A ride that reopens above its threshold stays silent.
pub fn decide(
    ride: &RideObservation,
    prior: Option<&RideObservation>,
    threshold: u32,
) -> Option<RideAlert> {
    let kind = match prior {
        None => {
            if !ride.is_open {
                AlertKind::Closed
            } else if ride.wait_minutes <= threshold {
                AlertKind::WaitTime
            } else {
                return None;
            }
        }
        Some(prior) => {
            if !ride.is_open && prior.is_open {
                AlertKind::Closed
            } else if ride.is_open && !prior.is_open && ride.wait_minutes <= threshold {
                AlertKind::Reopened
            } else if ride.wait_minutes != prior.wait_minutes && ride.wait_minutes <= threshold {
                AlertKind::WaitTime
            } else {
                return None;
            }
        }
    };

    Some(RideAlert {
        ride: ride.name.clone(),
        kind,
        wait_minutes: ride.wait_minutes,
    })
}
