use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorBody;
use thiserror::Error;

use crate::validate::ValidationError;

/// Everything a handler can fail with, mapped onto the HTTP surface:
/// 400 for bad payloads, 404 for a missed target row, 409 for a
/// business-identifier collision, 500 for anything else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    DuplicateKey(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

/// A body that axum's `Json` extractor could not deserialize (wrong
/// type in a field, malformed JSON) is a validation failure like any
/// other, not a bare 422.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::InvalidBody(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Missing required fields or invalid numeric values.".to_string(),
                    error: Some(err.to_string()),
                },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message,
                    error: None,
                },
            ),
            ApiError::DuplicateKey(message) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    message,
                    error: None,
                },
            ),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "Internal Server Error".to_string(),
                        error: Some(err.to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
