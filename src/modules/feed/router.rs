use axum::{Router, routing::get};

use super::controller::{get_feed, get_feed_post};
use crate::state::AppState;

pub fn init_feed_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_feed))
        .route("/{postID}", get(get_feed_post))
}
