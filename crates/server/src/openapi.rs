use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::users::{CreateUserRequest, UpdateUserRequest, UserResponse};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PaginationDoc {
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct FieldViolationDoc { pub field: String, pub rejected_value: String, pub message: String }

/// Envelope around a single user.
#[derive(utoipa::ToSchema)]
pub struct UserEnvelopeDoc { pub timestamp: String, pub status: u16, pub message: String, pub data: UserResponse }

/// Envelope around one page of users.
#[derive(utoipa::ToSchema)]
pub struct UserPageEnvelopeDoc {
    pub timestamp: String,
    pub status: u16,
    pub message: String,
    pub data: Vec<UserResponse>,
    pub pagination: PaginationDoc,
}

/// Envelope without data, as returned by DELETE.
#[derive(utoipa::ToSchema)]
pub struct MessageEnvelopeDoc { pub timestamp: String, pub status: u16, pub message: String }

/// Envelope of every failed request; `errors` only on validation failures.
#[derive(utoipa::ToSchema)]
pub struct ErrorEnvelopeDoc {
    pub timestamp: String,
    pub status: u16,
    pub message: String,
    pub errors: Option<Vec<FieldViolationDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            PaginationDoc,
            FieldViolationDoc,
            UserEnvelopeDoc,
            UserPageEnvelopeDoc,
            MessageEnvelopeDoc,
            ErrorEnvelopeDoc,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
