/// HTTP API for reading and writing ride thresholds.
///
///   POST /threshold   {"rideName": "Raptor", "threshold": 20}  -> echoes the body
///   GET  /threshold?rideName=Raptor                             -> 20 | null
///   GET  /health                                                -> "ok"
///
/// Writes go straight into the shared `ThresholdStore`, so the monitor picks
/// them up on its next cycle.

use crate::logging::{self, Component};
use crate::model::MonitorError;
use crate::scheduler::cancelled;
use crate::thresholds::ThresholdStore;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Body of `POST /threshold`, echoed back on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitTimeThreshold {
    pub ride_name: String,
    pub threshold: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdQuery {
    pub ride_name: String,
}

pub fn router(store: Arc<ThresholdStore>) -> Router {
    Router::new()
        .route("/threshold", post(set_threshold).get(get_threshold))
        .route("/health", get(health))
        .with_state(store)
}

async fn set_threshold(
    State(store): State<Arc<ThresholdStore>>,
    Json(body): Json<WaitTimeThreshold>,
) -> Json<WaitTimeThreshold> {
    store.set(&body.ride_name, body.threshold);
    logging::info(
        Component::Api,
        Some(&body.ride_name),
        &format!("Threshold set to {} minutes", body.threshold),
    );
    Json(body)
}

async fn get_threshold(
    State(store): State<Arc<ThresholdStore>>,
    Query(query): Query<ThresholdQuery>,
) -> Json<Option<u32>> {
    Json(store.get(&query.ride_name))
}

async fn health() -> &'static str {
    "ok"
}

/// Serves the API on `listener` until `shutdown` flips to `true`.
pub async fn serve(
    listener: TcpListener,
    store: Arc<ThresholdStore>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), MonitorError> {
    if let Ok(addr) = listener.local_addr() {
        logging::info(Component::Api, None, &format!("Threshold API listening on {}", addr));
    }

    axum::serve(listener, router(store))
        .with_graceful_shutdown(async move { cancelled(&mut shutdown).await })
        .await
        .map_err(|e| MonitorError::Transport(format!("threshold API: {}", e)))
}
