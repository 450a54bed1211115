use axum::{Router, routing::post};

use super::controller::{login_user, register_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/user", post(register_user))
        .route("/token", post(login_user))
}
