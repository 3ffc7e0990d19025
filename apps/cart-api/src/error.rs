//! Error types for the Cart API.
//!
//! ## Response Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiError                    Status   Body                              │
//! │  ─────────────────────────   ──────   ───────────────────────────────   │
//! │  MissingKeys                 422      {"errors": ["cart hash is ..."]}  │
//! │  MalformedCart               422      {"errors": ["lineItems must ..."]}│
//! │  UnpermittedParameters       422      {"error": "found unpermitted ..."}│
//! │  Validation                  422      {"errors": ["Name can't be ..."]} │
//! │  MalformedBody               400/413/415  {"error": "..."}              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use cartwise_core::CoreError;

/// Cart API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required keys are missing from the request.
    #[error("Missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// The cart is present but has the wrong structure.
    #[error("Malformed cart: {}", .0.join(", "))]
    MalformedCart(Vec<String>),

    /// Keys outside the permitted set, in first-seen order.
    #[error("{}", unpermitted_message(.0))]
    UnpermittedParameters(Vec<String>),

    /// Line item validation failed.
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The body could not be read as JSON.
    #[error("Malformed body: {message}")]
    MalformedBody { status: StatusCode, message: String },
}

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingKeys(_)
            | ApiError::MalformedCart(_)
            | ApiError::UnpermittedParameters(_)
            | ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedBody { status, .. } => *status,
        }
    }
}

/// `found unpermitted parameter: :a` or `found unpermitted parameters: :a, :b`.
fn unpermitted_message(keys: &[String]) -> String {
    let noun = if keys.len() == 1 { "parameter" } else { "parameters" };
    let keys: Vec<String> = keys.iter().map(|k| format!(":{}", k)).collect();
    format!("found unpermitted {}: {}", noun, keys.join(", "))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::MissingKeys(errors)
            | ApiError::MalformedCart(errors)
            | ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::UnpermittedParameters(keys) => {
                json!({ "error": unpermitted_message(&keys) })
            }
            ApiError::MalformedBody { message, .. } => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        ApiError::Validation(error.messages())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
