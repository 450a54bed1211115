use axum::{
    Router,
    routing::{patch, post},
};

use super::controller::{create_post, delete_post, update_post};
use crate::state::AppState;

pub fn init_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post))
        .route("/{postID}", patch(update_post).delete(delete_post))
}
