/// Feed ingestion for the ride monitoring service.
///
/// Submodules:
/// - `queue_times` — the queue-times.com park feed client.

pub mod queue_times;
