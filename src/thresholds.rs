/// Threshold registry and store for the ride monitoring service.
///
/// `DEFAULT_THRESHOLDS` is the seed table of newsworthy wait times for the
/// rides this service was set up to watch. `ThresholdStore` layers operator
/// overrides (written through the HTTP API) on top of it. Overrides never
/// expire; the last write wins for the lifetime of the process.

use crate::model::ThresholdMap;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Default wait-time thresholds in minutes, keyed by the ride name exactly
/// as the feed spells it.
pub static DEFAULT_THRESHOLDS: &[(&str, u32)] = &[
    ("Steel Vengeance", 60),
    ("Millennium Force", 45),
    ("Maverick", 45),
    ("Rougarou", 30),
    ("Valravn", 45),
    ("GateKeeper", 30),
    ("Raptor", 30),
    ("MaXair", 15),
];

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Authoritative source of "what wait time is newsworthy" per ride.
///
/// Shared between the scheduler and the threshold API behind an `Arc`.
#[derive(Debug, Default)]
pub struct ThresholdStore {
    overrides: RwLock<HashMap<String, u32>>,
}

impl ThresholdStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hard-coded seed mapping. Every entry carries a value.
    pub fn load_defaults(&self) -> ThresholdMap {
        DEFAULT_THRESHOLDS
            .iter()
            .map(|(name, minutes)| (name.to_string(), Some(*minutes)))
            .collect()
    }

    /// The threshold set for `ride_name` through `set`, or `None` if never set.
    pub fn get(&self, ride_name: &str) -> Option<u32> {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ride_name)
            .copied()
    }

    /// Creates or overwrites the threshold for `ride_name`.
    pub fn set(&self, ride_name: &str, minutes: u32) {
        self.overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ride_name.to_string(), minutes);
    }

    /// Seed defaults overlaid with every stored override.
    ///
    /// This is the mapping handed to the tracker once per cycle, so an
    /// override takes effect on the next cycle after it is written.
    pub fn effective_thresholds(&self) -> ThresholdMap {
        let mut thresholds = self.load_defaults();
        let overrides = self.overrides.read().unwrap_or_else(PoisonError::into_inner);
        for (name, minutes) in overrides.iter() {
            thresholds.insert(name.clone(), Some(*minutes));
        }
        thresholds
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
