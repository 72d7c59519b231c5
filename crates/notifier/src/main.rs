//! Launchpad Slack notifier binary.
//!
//! Reads newline-delimited JSON `LogEntry` values from stdin (as piped from the
//! deployment executor) and notifies Slack about finished deployments.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use launchpad_common::config::AppConfig;
use launchpad_common::db;
use launchpad_common::deploy::LogEntry;
use launchpad_common::registry::ApplicationRegistry;
use launchpad_common::store::PgStore;
use launchpad_notifier::{DeliveryClient, SlackNotifier};

/// Buffered log entries between stdin and the listener loop.
const LOG_CHANNEL_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "launchpad_notifier=info,launchpad_common=info".into()),
        )
        .json()
        .init();

    tracing::info!("Launchpad notifier starting...");

    // Load configuration
    let config = AppConfig::from_env()?;
    let registry = Arc::new(ApplicationRegistry::load(&config.applications_config)?);

    // Connect to database
    let pool = db::connect(&config).await?;

    let delivery = DeliveryClient::new(config.webhook_timeout())?;
    let notifier = Arc::new(SlackNotifier::new(
        Arc::new(PgStore::new(pool)),
        registry,
        config.notifier(),
        delivery,
    ));

    let (tx, rx) = mpsc::channel(LOG_CHANNEL_CAPACITY);
    let (listener, in_flight) = notifier.spawn_tracked(rx);
    let reader = tokio::spawn(async move {
        if let Err(e) = read_entries(tx).await {
            tracing::error!(error = %e, "Failed to read log entries from stdin");
        }
    });

    // Keep the runtime alive until notifications already launched are done.
    let drained = async {
        let launched = listener.await?;
        tracing::info!(launched, "Log stream closed, waiting for in-flight notifications");
        in_flight.wait().await;
        anyhow::Ok(())
    };

    tokio::select! {
        result = drained => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
            reader.abort();
        }
    }

    tracing::info!("Launchpad notifier stopped.");
    Ok(())
}

/// Forward JSON log entries from stdin until EOF. Dropping `tx` closes the
/// stream.
async fn read_entries(tx: mpsc::Sender<LogEntry>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<LogEntry>(line) {
            Ok(entry) => {
                if tx.send(entry).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed log entry");
            }
        }
    }

    Ok(())
}
