use axum::{Router, routing::post};

use super::controller::create_comment;
use crate::state::AppState;

pub fn init_comments_router() -> Router<AppState> {
    Router::new().route("/{postID}", post(create_comment))
}
