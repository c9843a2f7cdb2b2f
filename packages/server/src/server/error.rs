//! API error type and its JSON rendering.
//!
//! | variant          | status | body                                              |
//! |------------------|--------|---------------------------------------------------|
//! | `InvalidPayload` | 400    | `{"error":"invalid_payload","details":{...}}`     |
//! | `InvalidUrl`     | 400    | `{"error":"invalid_url","details":"..."}`         |
//! | `NotFound`       | 404    | `{"error":"not_found","entity":"contact"}`        |
//! | `Internal`       | 500    | `{"error":"internal_error"}`                      |

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::common::ValidationErrors;
use crate::domains::followups::FollowupError;
use crate::domains::scan::ScanError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid payload")]
    InvalidPayload(ValidationErrors),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidPayload(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid_payload", "details": details }),
            ),
            ApiError::InvalidUrl(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid_url", "details": details }),
            ),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "not_found", "entity": entity }),
            ),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal_error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::InvalidPayload(errors)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidPayload(ValidationErrors::form(rejection.body_text()))
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidUrl { .. } => ApiError::InvalidUrl(err.to_string()),
        }
    }
}

impl From<FollowupError> for ApiError {
    fn from(err: FollowupError) -> Self {
        match err {
            FollowupError::BusinessNotFound(_) => ApiError::NotFound("business"),
            FollowupError::ContactNotFound(_) => ApiError::NotFound("contact"),
            FollowupError::Database(e) => ApiError::Internal(e),
        }
    }
}
