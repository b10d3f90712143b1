//! Demonstration routes: home, add, about, the submit form, config status and the error trigger.

use crate::error::AppError;
use crate::extractors::Submission;
use crate::response::ok;
use crate::service::{Field, FieldErrors, FieldRules, ItemForm, Violation};
use crate::state::AppState;
use crate::utils::{add_numbers, get_home_message};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

const SUBMIT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Submit an Item</title>
</head>
<body>
    <h1>Submit an Item</h1>
    <form method="post" action="/submit">
        <label for="name">Name</label>
        <input type="text" id="name" name="name" maxlength="50" required>
        <label for="description">Description</label>
        <textarea id="description" name="description" maxlength="200" required></textarea>
        <button type="submit">Submit</button>
    </form>
</body>
</html>
"#;

#[derive(Serialize)]
pub struct SumBody {
    pub result: i64,
}

#[derive(Serialize)]
struct SubmittedBody {
    message: &'static str,
    name: String,
    description: String,
}

#[derive(Serialize)]
pub struct ConfigStatusBody {
    pub debug_mode: bool,
}

pub async fn home() -> impl IntoResponse {
    ok(get_home_message())
}

/// Segments are parsed here rather than by the router so bad input gets a JSON 400.
pub async fn add(Path((a, b)): Path<(String, String)>) -> Result<impl IntoResponse, AppError> {
    let a: i64 = a.parse().map_err(|_| AppError::InvalidInteger)?;
    let b: i64 = b.parse().map_err(|_| AppError::InvalidInteger)?;
    let result = add_numbers(a, b).ok_or(AppError::OutOfRange)?;
    Ok(ok(SumBody { result }))
}

pub async fn about() -> &'static str {
    "About Page"
}

pub async fn submit_form() -> Html<&'static str> {
    Html(SUBMIT_PAGE)
}

pub async fn submit(Submission(fields): Submission) -> Result<impl IntoResponse, AppError> {
    let item = ItemForm::from_fields(&fields)
        .validate(&FieldRules::SUBMIT)
        .map_err(|errors| AppError::BadRequest(submit_error(&errors).into()))?;
    Ok(ok(SubmittedBody {
        message: "Form submitted successfully",
        name: item.name,
        description: item.description,
    }))
}

/// One message for the highest-priority violation: name before description, required before length.
fn submit_error(errors: &FieldErrors) -> &'static str {
    let first = errors.iter().min_by_key(|(field, violation)| {
        (*field, matches!(violation, Violation::TooLong { .. }))
    });
    match first {
        Some((Field::Name, Violation::Required)) => "Name required",
        Some((Field::Name, Violation::TooLong { .. })) => "Name is too long",
        Some((Field::Description, Violation::Required)) => "Description required",
        Some((Field::Description, Violation::TooLong { .. })) => "Description is too long",
        None => "Invalid form data",
    }
}

pub async fn config_status(State(state): State<AppState>) -> Json<ConfigStatusBody> {
    Json(ConfigStatusBody {
        debug_mode: state.config.debug_mode(),
    })
}

/// Divides by zero on purpose; the panic layer turns it into a 500.
pub async fn trigger_error() -> Json<SumBody> {
    let divisor = std::hint::black_box(0_i64);
    Json(SumBody { result: 1 / divisor })
}
