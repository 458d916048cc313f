//! Extractors that turn malformed or invalid input into `ApiError` instead of axum's plain-text
//! rejections.

use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use service::users::{FieldViolation, UserId};
use validator::{Validate, ValidationErrors};

use crate::errors::ApiError;

/// JSON body validated with the `validator` crate.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        data.validate().map_err(|e| ApiError::validation(violations(&e)))?;
        Ok(Self(data))
    }
}

/// `{id}` path segment parsed as a user id.
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<UserId>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(id))
    }
}

/// `?page=&size=` with defaults `(0, 10)`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub size: Option<i64>,
}

impl PageParams {
    pub const DEFAULT_PAGE: i64 = 0;
    pub const DEFAULT_SIZE: i64 = 10;

    pub fn page(&self) -> i64 { self.page.unwrap_or(Self::DEFAULT_PAGE) }

    pub fn size(&self) -> i64 { self.size.unwrap_or(Self::DEFAULT_SIZE) }
}

/// Validated page parameters.
pub struct PageQuery(pub PageParams);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        params.validate().map_err(|e| ApiError::validation(violations(&e)))?;
        Ok(Self(params))
    }
}

/// Flatten validator output into `{field, rejectedValue, message}` entries, sorted by field.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldViolation {
                field: field.clone(),
                rejected_value: err.params.get("value").map(render_value).unwrap_or_else(|| "null".into()),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
