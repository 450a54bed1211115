use axum::{Json, extract::State};
use scribe_core::{AppError, DataResponse};
use scribe_models::{Post, PostWithComments};
use tracing::instrument;

use super::service::FeedService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedPath;

/// List all posts, newest first
#[utoipa::path(
    get,
    path = "/feed",
    responses(
        (status = 200, description = "All posts", body = DataResponse<Vec<Post>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Feed"
)]
#[instrument(skip(state))]
pub async fn get_feed(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Post>>>, AppError> {
    let posts = FeedService::get_feed(&state.storage).await?;
    Ok(Json(DataResponse::new(posts)))
}

/// Fetch a post with its comments
#[utoipa::path(
    get,
    path = "/feed/{postID}",
    params(("postID" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post and its comments", body = DataResponse<PostWithComments>),
        (status = 400, description = "Malformed post ID", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Feed"
)]
#[instrument(skip(state))]
pub async fn get_feed_post(
    State(state): State<AppState>,
    ValidatedPath(post_id): ValidatedPath<i64>,
) -> Result<Json<DataResponse<PostWithComments>>, AppError> {
    let post = FeedService::get_post(&state.storage, post_id).await?;
    Ok(Json(DataResponse::new(post)))
}
