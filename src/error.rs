//! Typed errors and HTTP mapping.

use crate::response::ErrorBody;
use crate::service::FieldErrors;
use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid bind address: {0}")]
    InvalidBindAddr(String),
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Item not found")]
    NotFound,
    #[error("No form data provided")]
    NoFormData,
    #[error("Invalid form data")]
    InvalidForm(FieldErrors),
    #[error("Invalid type for '{0}'. Expected a string.")]
    InvalidType(String),
    #[error("Request must contain JSON data")]
    NotJson,
    #[error("Invalid input: parameters must be integers")]
    InvalidInteger,
    #[error("Invalid input: result out of range")]
    OutOfRange,
    #[error("{0}")]
    BadRequest(String),
    /// Body could not be read, e.g. over the size limit. Keeps the extractor's status.
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(r) => AppError::Body {
                status: r.status(),
                message: r.body_text(),
            },
            _ => AppError::NotJson,
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        match rejection {
            FormRejection::BytesRejection(r) => AppError::Body {
                status: r.status(),
                message: r.body_text(),
            },
            _ => AppError::NoFormData,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Body { status, .. } => *status,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NoFormData
            | AppError::InvalidForm(_)
            | AppError::InvalidType(_)
            | AppError::NotJson
            | AppError::InvalidInteger
            | AppError::OutOfRange
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = match self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                ErrorBody::new("Database error")
            }
            AppError::InvalidForm(errors) => ErrorBody {
                error: "Invalid form data".into(),
                errors: Some(errors),
            },
            other => ErrorBody::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
