//! Response envelope shared by every user endpoint.

use axum::http::StatusCode;
use serde::Serialize;
use service::pagination::PaginationInfo;
use service::users::FieldViolation;

/// `{timestamp, status, message, data?, errors?, pagination?}`; absent members are omitted.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub timestamp: String,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T> ApiResponse<T> {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: status.as_u16(),
            message: message.into(),
            data: None,
            errors: None,
            pagination: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self::with_message(StatusCode::OK, data, "Success")
    }

    pub fn with_message(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self { data: Some(data), ..Self::new(status, message) }
    }

    pub fn paged(data: T, pagination: PaginationInfo) -> Self {
        Self { pagination: Some(pagination), ..Self::success(data) }
    }
}

impl ApiResponse<()> {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message)
    }

    pub fn error(status: StatusCode, message: impl Into<String>, errors: Option<Vec<FieldViolation>>) -> Self {
        Self { errors, ..Self::new(status, message) }
    }
}
