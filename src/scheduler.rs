/// Polling loop for the ride monitoring service.
///
/// A `Monitor` owns one park's tracker together with the feed and the
/// notifier. Each cycle fetches the feed, evaluates it against the current
/// thresholds and delivers the composed block exactly once.
///
/// # Cancellation
/// Cycles take a `watch::Receiver<bool>`; flipping it to `true` aborts a
/// cycle that is still waiting on the feed, before any state changes.
/// Evaluation itself never suspends, so a cycle past the fetch always
/// runs to completion.

use crate::alert::{compose_message, RideAlert, RideStateTracker};
use crate::ingest::queue_times::FeedSource;
use crate::logging::{self, Component};
use crate::model::MonitorError;
use crate::notify::Notifier;
use crate::thresholds::ThresholdStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

/// Outcome of one successful cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Distinct rides the tracker has seen so far.
    pub rides_tracked: usize,
    pub alerts: Vec<RideAlert>,
    /// The block handed to the notifier.
    pub message: String,
}

pub struct Monitor<F, N> {
    tracker: RideStateTracker,
    feed: F,
    notifier: N,
    thresholds: Arc<ThresholdStore>,
}

impl<F: FeedSource, N: Notifier> Monitor<F, N> {
    pub fn new(feed: F, notifier: N, thresholds: Arc<ThresholdStore>) -> Self {
        Self {
            tracker: RideStateTracker::new(),
            feed,
            notifier,
            thresholds,
        }
    }

    pub fn tracker(&self) -> &RideStateTracker {
        &self.tracker
    }

    /// Runs one fetch, evaluate and deliver pass.
    ///
    /// Errors are returned, never retried here. The next scheduled tick
    /// starts from whatever state the last successful evaluation left.
    pub async fn run_cycle(
        &mut self,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<CycleReport, MonitorError> {
        let thresholds = self.thresholds.effective_thresholds();

        if *cancel.borrow() {
            return Err(MonitorError::Cancelled);
        }

        let feed = tokio::select! {
            result = self.feed.fetch() => result?,
            _ = cancelled(cancel) => return Err(MonitorError::Cancelled),
        };

        let lands = feed.as_ref().map(|f| f.lands.as_slice()).unwrap_or_default();
        let alerts = self.tracker.evaluate_alerts(lands, &thresholds)?;

        let lines: Vec<String> = alerts.iter().map(ToString::to_string).collect();
        for alert in &alerts {
            logging::debug(Component::Tracker, Some(&alert.ride), &alert.to_string());
        }

        let message = compose_message(&lines);
        self.notifier.deliver(&message).await?;

        Ok(CycleReport {
            rides_tracked: self.tracker.tracked_rides(),
            alerts,
            message,
        })
    }

    /// Runs a cycle every `period` until `shutdown` flips to `true`.
    ///
    /// The first cycle starts immediately. Ticks missed while a slow cycle
    /// was running are skipped rather than replayed.
    pub async fn run(mut self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        logging::info(
            Component::System,
            None,
            &format!("Monitor started, polling every {}s", period.as_secs()),
        );

        let mut tick = interval(period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {}
                _ = cancelled(&mut shutdown) => break,
            }

            logging::debug(
                Component::System,
                None,
                &format!("Monitor running at: {}", chrono::Local::now().to_rfc3339()),
            );

            match self.run_cycle(&mut shutdown).await {
                Ok(report) => logging::log_cycle_summary(report.rides_tracked, report.alerts.len()),
                Err(MonitorError::Cancelled) => {
                    logging::log_cycle_failure(&MonitorError::Cancelled);
                    break;
                }
                Err(e) => logging::log_cycle_failure(&e),
            }
        }

        logging::info(Component::System, None, "Monitor stopped");
    }
}

/// Resolves once the signal reads `true`. Never resolves if the sender is gone.
pub async fn cancelled(signal: &mut watch::Receiver<bool>) {
    let stopped = signal.wait_for(|stop| *stop).await.is_ok();
    if !stopped {
        std::future::pending::<()>().await;
    }
}
