use axum::{Json, extract::State, http::StatusCode};
use scribe_core::{AppError, DataResponse};
use scribe_models::{CreatePostRequest, Post, UpdatePostRequest};
use tracing::instrument;

use super::service::PostService;
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::AuthorizedPost;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = DataResponse<Post>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<DataResponse<Post>>), AppError> {
    let post = PostService::create_post(&state.storage, &user, dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(post))))
}

/// Partially update a post
///
/// Only the owner or an admin may update. Include `version` to make sure
/// nobody changed the post since you read it; a stale version returns 404.
#[utoipa::path(
    patch,
    path = "/posts/{postID}",
    params(("postID" = i64, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = DataResponse<Post>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner and below admin", body = ErrorResponse),
        (status = 404, description = "Post not found or version conflict", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state, target, dto), fields(post_id = target.post.id, user_id = %target.user.id))]
pub async fn update_post(
    State(state): State<AppState>,
    target: AuthorizedPost,
    ValidatedJson(dto): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<DataResponse<Post>>, AppError> {
    let post = PostService::update_post(&state.storage, target.post, dto).await?;
    Ok(Json(DataResponse::new(post)))
}

/// Delete a post and its comments
#[utoipa::path(
    delete,
    path = "/posts/{postID}",
    params(("postID" = i64, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the owner and below admin", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state, target), fields(post_id = target.post.id, user_id = %target.user.id))]
pub async fn delete_post(
    State(state): State<AppState>,
    target: AuthorizedPost,
) -> Result<StatusCode, AppError> {
    PostService::delete_post(&state.storage, target.post.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
