/// Live checks against the queue-times.com feed
///
/// These tests verify that the configured park feed is reachable and still
/// has the shape the tracker expects. They are marked #[ignore] so they
/// don't run during normal CI builds (which shouldn't depend on external
/// API availability).
///
/// Prerequisites:
/// - QUEUE_TIMES_BASE_ADDRESS set in .env (defaults to Cedar Point)
/// - Internet access to queue-times.com
///
/// Run with: cargo test --test queue_times_live -- --ignored

use ridemon_service::alert::RideStateTracker;
use ridemon_service::ingest::queue_times::{FeedSource, QueueTimesClient};
use ridemon_service::model::{MonitorError, MONITORED_LANDS};
use ridemon_service::thresholds::ThresholdStore;
use std::env;
use std::time::Duration;

const DEFAULT_PARK: &str = "https://queue-times.com/parks/1/";

fn live_client() -> QueueTimesClient {
    dotenv::dotenv().ok();
    let base = env::var("QUEUE_TIMES_BASE_ADDRESS").unwrap_or_else(|_| DEFAULT_PARK.to_string());
    QueueTimesClient::new(&base, Duration::from_secs(30)).expect("Failed to create feed client")
}

#[tokio::test]
#[ignore] // Don't run in CI - depends on external API
async fn live_feed_returns_lands() {
    let client = live_client();
    println!("Testing feed: {}", client.url());

    let feed = client
        .fetch()
        .await
        .expect("feed request failed - check network connectivity")
        .expect("feed returned a null body");

    println!("✓ Feed returned {} lands", feed.lands.len());
    assert!(!feed.lands.is_empty(), "park feed should list at least one land");
    for land in &feed.lands {
        println!(
            "   {} ({} rides){}",
            land.name,
            land.rides.len(),
            if MONITORED_LANDS.contains(&land.name.as_str()) { " *" } else { "" }
        );
    }
}

#[tokio::test]
#[ignore] // Don't run in CI - depends on external API
async fn live_feed_evaluates_against_default_thresholds() {
    let client = live_client();
    let feed = client.fetch().await.expect("feed request failed");
    let thresholds = ThresholdStore::new().effective_thresholds();
    let mut tracker = RideStateTracker::new();

    match tracker.evaluate_feed(feed.as_ref(), &thresholds) {
        Ok(lines) => {
            println!("✓ {} rides tracked, {} alerts", tracker.tracked_rides(), lines.len());
            for line in &lines {
                println!("   - {}", line);
            }
            assert!(tracker.tracked_rides() > 0);
        }
        Err(e @ (MonitorError::EmptyFeed | MonitorError::NoQualifyingRides)) => {
            // Off-season parks legitimately report nothing; warn instead of failing.
            eprintln!("\n⚠ WARNING: {}", e);
        }
        Err(e) => panic!("unexpected evaluation error: {}", e),
    }
}
