//! Item CRUD handlers: create, list, read, update, delete.

use crate::error::AppError;
use crate::extractors::Submission;
use crate::response::{created, message_body, ok};
use crate::service::{changes_from_json, FieldRules, ItemForm, ItemService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Ids are integers; any other segment cannot name an item.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::NotFound)
}

pub async fn create(
    State(state): State<AppState>,
    Submission(fields): Submission,
) -> Result<impl IntoResponse, AppError> {
    let item = ItemForm::from_fields(&fields)
        .validate(&FieldRules::CREATE)
        .map_err(AppError::InvalidForm)?;
    let row = ItemService::create(&state.pool, &item).await?;
    Ok(created(row))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = ItemService::list(&state.pool).await?;
    Ok(ok(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = ItemService::read(&state.pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(ok(row))
}

/// The body is checked before the id is looked up.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let Value::Object(body) = body else {
        return Err(AppError::NotJson);
    };
    let changes = changes_from_json(&body, &FieldRules::CREATE)?;
    let id = parse_id(&id_str)?;
    let row = if changes.is_empty() {
        ItemService::read(&state.pool, id).await?
    } else {
        ItemService::update(&state.pool, id, &changes).await?
    };
    Ok(ok(row.ok_or(AppError::NotFound)?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !ItemService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }
    Ok(message_body("Item deleted"))
}
