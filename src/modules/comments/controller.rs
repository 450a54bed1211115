use axum::{Json, extract::State, http::StatusCode};
use scribe_core::{AppError, DataResponse};
use scribe_models::{Comment, CreateCommentRequest};
use tracing::instrument;

use super::service::CommentService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Comment on a post
#[utoipa::path(
    post,
    path = "/posts/comments/{postID}",
    params(("postID" = i64, Path, description = "Post ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = DataResponse<Comment>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id))]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedPath(post_id): ValidatedPath<i64>,
    ValidatedJson(dto): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<DataResponse<Comment>>), AppError> {
    let comment = CommentService::create_comment(&state.storage, post_id, &user, dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(comment))))
}
