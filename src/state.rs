//! Shared application state for all routes.

use crate::config::AppConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Fixed for the process lifetime.
    pub config: Arc<AppConfig>,
}
