use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use scribe_core::{AppError, DataResponse};
use scribe_models::{UpdateUserRequest, User};
use tracing::instrument;

use super::service::UserService;
use crate::middleware::ownership::UserContext;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Activate an account
#[utoipa::path(
    put,
    path = "/users/activate/{token}",
    params(("token" = String, Path, description = "Invitation token")),
    responses(
        (status = 204, description = "User activated"),
        (status = 404, description = "Unknown or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, token))]
pub async fn activate_user(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, AppError> {
    UserService::activate_user(&state.storage, &token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = DataResponse<Vec<User>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<User>>>, AppError> {
    let users = UserService::get_users(&state.storage).await?;
    Ok(Json(DataResponse::new(users)))
}

/// Fetch a user profile
#[utoipa::path(
    get,
    path = "/users/{userID}",
    params(("userID" = uuid::Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = DataResponse<User>),
        (status = 400, description = "Malformed user ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn get_user(UserContext(user): UserContext) -> Json<DataResponse<User>> {
    Json(DataResponse::new(user))
}

/// Update a user's username or email
#[utoipa::path(
    patch,
    path = "/users/{userID}",
    params(("userID" = uuid::Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated profile", body = DataResponse<User>),
        (status = 400, description = "Validation error or duplicate username/email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn update_user(
    State(state): State<AppState>,
    UserContext(user): UserContext,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<DataResponse<User>>, AppError> {
    let user = UserService::update_user(&state.storage, user, dto).await?;
    Ok(Json(DataResponse::new(user)))
}

/// Delete a user together with their posts and comments
#[utoipa::path(
    delete,
    path = "/users/{userID}",
    params(("userID" = uuid::Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed user ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserContext(user): UserContext,
) -> Result<StatusCode, AppError> {
    UserService::delete_user(&state.storage, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
