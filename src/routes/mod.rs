//! Router assembly and the top-level panic handler.

mod common;
mod items;

pub use common::page_routes;
pub use items::item_routes;

use crate::response::ErrorBody;
use crate::state::AppState;
use axum::{
    body::{Bytes, HttpBody},
    http::{
        header::{ALLOW, CONTENT_TYPE},
        StatusCode,
    },
    middleware::map_response,
    response::{IntoResponse, Response},
    BoxError, Json, Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// All routes with body limit, request tracing and panic interception.
pub fn app_routes(state: AppState) -> Router {
    let body_limit = state.config.body_limit;
    Router::new()
        .merge(page_routes(state.clone()))
        .merge(item_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(map_response(json_error_bodies))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found")))
}

/// Give the bodiless 405 and 413 produced by routing and the body limit an `{"error"}` body.
async fn json_error_bodies<B>(response: Response<B>) -> Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let status = response.status();
    let has_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);
    if has_json || !matches!(status, StatusCode::METHOD_NOT_ALLOWED | StatusCode::PAYLOAD_TOO_LARGE) {
        return response.into_response();
    }
    let allow = response.headers().get(ALLOW).cloned();
    let message = status.canonical_reason().unwrap_or("Request rejected");
    let mut out = (status, Json(ErrorBody::new(message))).into_response();
    if let Some(allow) = allow {
        out.headers_mut().insert(ALLOW, allow);
    }
    out
}

/// Convert a handler panic into a 500 naming the fault kind.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_message(payload.as_ref());
    let kind = fault_kind(detail);
    tracing::error!(panic = %detail, kind, "handler panicked");
    let body = ErrorBody::new(format!("An internal server error occurred - {}", kind));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

fn fault_kind(message: &str) -> &'static str {
    if message.contains("divide by zero") || message.contains("remainder with a divisor of zero") {
        "ZeroDivisionError"
    } else {
        "InternalError"
    }
}
