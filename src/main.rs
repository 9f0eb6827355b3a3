//! `ridemon` daemon: runs the polling loop and the threshold API side by side.
//!
//! Configuration comes from `ridemon.toml` (or `$RIDEMON_CONFIG`), with
//! `QUEUE_TIMES_BASE_ADDRESS` and `SLACK_HOOK_URL` overridable from the
//! environment or a `.env` file. Stops on Ctrl-C or SIGTERM.

use ridemon_service::api;
use ridemon_service::config::Config;
use ridemon_service::ingest::queue_times::QueueTimesClient;
use ridemon_service::logging::{self, Component};
use ridemon_service::model::MonitorError;
use ridemon_service::notify::WebhookNotifier;
use ridemon_service::scheduler::Monitor;
use ridemon_service::thresholds::ThresholdStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init_logger(
        config.log_level()?,
        config.logging.file.as_deref(),
        config.logging.console_timestamps,
    );
    config.validate()?;

    // Both collaborators fail fast on missing settings.
    let feed = QueueTimesClient::new(&config.queue_times.base_address, config.fetch_timeout())?;
    let notifier = WebhookNotifier::from_config(config.slack.hook_url.as_deref())?;
    logging::info(Component::Feed, None, &format!("Polling {}", feed.url()));

    let store = Arc::new(ThresholdStore::new());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let api_handle = if config.api.enabled {
        let listener = TcpListener::bind(&config.api.bind_address)
            .await
            .map_err(|e| {
                MonitorError::Configuration(format!(
                    "binding {}: {}",
                    config.api.bind_address, e
                ))
            })?;
        Some(tokio::spawn(api::serve(
            listener,
            store.clone(),
            shutdown_rx.clone(),
        )))
    } else {
        logging::info(Component::Api, None, "Threshold API disabled");
        None
    };

    let monitor = Monitor::new(feed, notifier, store);
    let monitor_handle = tokio::spawn(monitor.run(config.poll_interval(), shutdown_rx));

    shutdown_signal().await;
    let _ = shutdown_tx.send(true);

    monitor_handle.await?;
    if let Some(handle) = api_handle {
        handle.await??;
    }

    logging::info(Component::System, None, "Service stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logging::error(
                Component::System,
                None,
                &format!("Failed to install Ctrl+C handler: {}", e),
            );
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                logging::error(
                    Component::System,
                    None,
                    &format!("Failed to install SIGTERM handler: {}", e),
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            logging::info(Component::System, None, "Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            logging::info(Component::System, None, "Received terminate signal, shutting down");
        }
    }
}
