//! Extract submitted item fields from either a form-encoded or a JSON body.

use crate::error::AppError;
use crate::service::Field;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// Non-empty set of string fields from the request body.
///
/// `application/json` bodies must be objects; any other body is decoded as
/// `application/x-www-form-urlencoded`. An undecodable or empty form is `NoFormData`;
/// a body that cannot be read at all keeps the extractor's status (413 over the limit).
#[derive(Clone, Debug)]
pub struct Submission(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = if is_json(req.headers()) {
            let Json(value) = Json::<Value>::from_request(req, state).await?;
            string_fields(value)?
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state).await?;
            fields
        };

        if fields.is_empty() {
            return Err(AppError::NoFormData);
        }
        Ok(Submission(fields))
    }
}

/// Media types are case-insensitive.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}

fn string_fields(value: Value) -> Result<HashMap<String, String>, AppError> {
    let Value::Object(map) = value else {
        return Err(AppError::NoFormData);
    };
    let mut out = HashMap::with_capacity(map.len());
    for (key, v) in map {
        match v {
            Value::String(s) => {
                out.insert(key, s);
            }
            Value::Null => {}
            _ if Field::ALL.iter().any(|f| f.as_str() == key) => {
                return Err(AppError::InvalidType(key));
            }
            _ => {}
        }
    }
    Ok(out)
}
