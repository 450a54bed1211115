use axum::{Json, extract::State, http::StatusCode};
use scribe_core::{AppError, DataResponse};
use scribe_models::{LoginRequest, RegisterUserRequest, UserWithToken};
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new user
///
/// The account stays inactive until the returned invitation token is
/// redeemed at `PUT /users/activate/{token}`.
#[utoipa::path(
    post,
    path = "/authentication/user",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered, invitation token returned", body = DataResponse<UserWithToken>),
        (status = 400, description = "Validation error or duplicate username/email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<DataResponse<UserWithToken>>), AppError> {
    let user = AuthService::register_user(&state.storage, &state.config.invitation, dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(user))))
}

/// Exchange credentials for a session token
#[utoipa::path(
    post,
    path = "/authentication/token",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Token issued", body = DataResponse<String>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<DataResponse<String>>), AppError> {
    let token = AuthService::login_user(
        &state.storage,
        state.authenticator.as_ref(),
        &state.config.token,
        dto,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(token))))
}
