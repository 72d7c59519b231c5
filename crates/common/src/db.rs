use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;

/// How long a notification task waits for a free connection before the lookup
/// fails as a storage error.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect to the deployments database and bring its schema up to date.
///
/// Pool size comes from `AppConfig::db_max_connections`. Notification tasks
/// share the pool for their read-only lookups.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot connect to deployments database: {}", e))?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Connected to deployments database, migrations applied"
    );
    Ok(pool)
}
