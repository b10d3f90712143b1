//! Application assembly: storage from config, table bootstrap, router.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::routes::app_routes;
use crate::state::AppState;
use crate::store::{connect, ensure_items_table};
use axum::Router;
use std::sync::Arc;

/// Build the application for an explicit configuration.
pub async fn create_app(config: AppConfig) -> Result<Router, AppError> {
    let state = create_state(config).await?;
    Ok(app_routes(state))
}

/// Connect the configured store and make sure the items table exists.
pub async fn create_state(config: AppConfig) -> Result<AppState, AppError> {
    let pool = connect(&config).await?;
    ensure_items_table(&pool).await?;
    tracing::info!(mode = ?config.mode, debug_mode = config.debug_mode(), "application configured");
    Ok(AppState {
        pool,
        config: Arc::new(config),
    })
}
