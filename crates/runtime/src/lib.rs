use std::sync::Arc;

use anyhow::{Context, Result};
use attendance_config::AppConfig;
use attendance_database::initialize_database;
use attendance_messaging::{FcmClient, LoggingSender, PushSender};
use sqlx::SqlitePool;
use tracing::{info, warn};

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// How outgoing push messages leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushMode {
    Fcm,
    DryRun,
}

/// Process-wide handles shared by every handler invocation.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub push_sender: Arc<dyn PushSender>,
    pub push_mode: PushMode,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let (push_sender, push_mode): (Arc<dyn PushSender>, PushMode) =
            if config.messaging.is_configured() {
                let client = FcmClient::new(&config.messaging)
                    .context("failed to build push provider client")?;
                info!(endpoint = client.endpoint(), "push provider ready");
                (Arc::new(client), PushMode::Fcm)
            } else {
                warn!("push provider credentials missing, notifications will only be logged");
                (Arc::new(LoggingSender), PushMode::DryRun)
            };

        Ok(Self {
            db_pool,
            push_sender,
            push_mode,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
