use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::users::{NewUser, User, UserId, UserPatch};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ApiError;
use crate::extract::{PageQuery, UserIdPath, ValidatedJson};
use crate::response::ApiResponse;
use crate::openapi::{ErrorEnvelopeDoc, MessageEnvelopeDoc, UserEnvelopeDoc, UserPageEnvelopeDoc};
use crate::state::AppState;

/// Create payload. `name`, `username` and `email` are required; a client `id` is ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub id: Option<UserId>,
    #[validate(required(message = "must not be null"), length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(required(message = "must not be null"), length(min = 1, message = "must not be empty"))]
    pub username: Option<String>,
    #[validate(required(message = "must not be null"), email(message = "must be a well-formed email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(r: CreateUserRequest) -> Self {
        NewUser {
            id: r.id,
            name: r.name.unwrap_or_default(),
            username: r.username.unwrap_or_default(),
            email: r.email.unwrap_or_default(),
            phone: r.phone,
            website: r.website,
        }
    }
}

/// Update payload: every field optional, present ones follow the create rules.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: Option<String>,
    #[validate(email(message = "must be a well-formed email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(r: UpdateUserRequest) -> Self {
        UserPatch { name: r.name, username: r.username, email: r.email, phone: r.phone, website: r.website }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Option<UserId>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse { id: u.id, name: u.name, username: u.username, email: u.email, phone: u.phone, website: u.website }
    }
}

#[utoipa::path(get, path = "/users", tag = "users",
    params(("page" = Option<i64>, Query, description = "0-based page, default 0"), ("size" = Option<i64>, Query, description = "page size, default 10")),
    responses((status = 200, description = "One page of users", body = UserPageEnvelopeDoc), (status = 400, description = "Invalid page parameters", body = ErrorEnvelopeDoc)))]
pub async fn list_users(
    State(state): State<AppState>,
    PageQuery(params): PageQuery,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let page = state.users.list_paged(params.page(), params.size()).await?;
    let data = page.items.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::paged(data, page.pagination)))
}

#[utoipa::path(get, path = "/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "User", body = UserEnvelopeDoc), (status = 404, description = "Not Found", body = ErrorEnvelopeDoc)))]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.users.get(id).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

#[utoipa::path(post, path = "/users", tag = "users", request_body = CreateUserRequest,
    responses((status = 201, description = "Created", body = UserEnvelopeDoc), (status = 400, description = "Bad Request", body = ErrorEnvelopeDoc), (status = 409, description = "Conflict", body = ErrorEnvelopeDoc)))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.users.create(input.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(StatusCode::CREATED, user.into(), "User created successfully")),
    ))
}

#[utoipa::path(put, path = "/users/{id}", tag = "users", request_body = UpdateUserRequest,
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "Updated", body = UserEnvelopeDoc), (status = 400, description = "Bad Request", body = ErrorEnvelopeDoc), (status = 404, description = "Not Found", body = ErrorEnvelopeDoc), (status = 409, description = "Conflict", body = ErrorEnvelopeDoc)))]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.users.update(id, input.into()).await?;
    Ok(Json(ApiResponse::with_message(StatusCode::OK, user.into(), "User updated successfully")))
}

#[utoipa::path(delete, path = "/users/{id}", tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "Deleted; envelope status is 204", body = MessageEnvelopeDoc), (status = 404, description = "Not Found", body = ErrorEnvelopeDoc)))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.users.delete(id).await?;
    Ok(Json(ApiResponse::message(StatusCode::NO_CONTENT, "User deleted successfully")))
}
