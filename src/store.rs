//! Connection pool setup and `items` table DDL.

use crate::config::AppConfig;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const FILE_POOL_SIZE: u32 = 5;

/// Open the pool for the configured database.
///
/// An in-memory database exists only as long as its connection, so it gets a single
/// connection that never expires. A file database is created if missing.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&config.database_url)?;
    let pool = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(FILE_POOL_SIZE)
            .connect_with(opts.create_if_missing(true))
            .await?
    };
    tracing::debug!(url = %config.database_url, "database pool ready");
    Ok(pool)
}

/// Create the `items` table if it does not exist. AUTOINCREMENT keeps deleted ids from being reused.
pub async fn ensure_items_table(pool: &SqlitePool) -> Result<(), AppError> {
    let ddl = r#"
        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )
        "#;
    sqlx::query(ddl).execute(pool).await?;
    Ok(())
}
