use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::users::{FieldViolation, UserError};
use thiserror::Error;
use tracing::{error, warn};

use crate::response::ApiResponse;

/// Everything a user endpoint can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    User(#[from] UserError),
    /// Unparseable path, query or body.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        ApiError::User(UserError::Validation(violations))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::User(UserError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::User(UserError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::User(UserError::Validation(_)) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::User(UserError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::User(UserError::Validation(violations)) => {
                ApiResponse::error(status, "Validation failure", Some(violations))
            }
            ApiError::User(err @ UserError::Store(_)) => {
                error!(code = err.code(), error = %err, "store failure");
                ApiResponse::error(status, err.to_string(), None)
            }
            ApiError::User(err) => {
                warn!(code = err.code(), error = %err, "request rejected");
                ApiResponse::error(status, err.to_string(), None)
            }
            ApiError::BadRequest(msg) => ApiResponse::error(status, msg, None),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
