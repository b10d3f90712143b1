//! Demonstration routes: home, arithmetic, about, submit form, config status, error trigger.

use crate::handlers::pages::{about, add, config_status, home, submit, submit_form, trigger_error};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/add/:a/:b", get(add))
        .route("/about", get(about))
        .route("/submit", get(submit_form).post(submit))
        .route("/config-status", get(config_status))
        .route("/trigger-error", get(trigger_error))
        .with_state(state)
}
