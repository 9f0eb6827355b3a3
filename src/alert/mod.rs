/// Alerting for the ride monitoring service.
///
/// Submodules:
/// - `transitions` — the per-ride rule deciding whether an observation is newsworthy.
/// - `tracker` — cross-cycle state and batch evaluation.

pub mod tracker;
pub mod transitions;

pub use tracker::{compose_message, RideStateTracker};
pub use transitions::{AlertKind, RideAlert};
