use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{activate_user, delete_user, get_user, get_users, update_user};
use crate::state::AppState;

/// Routes that require a bearer token.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{userID}", get(get_user).patch(update_user).delete(delete_user))
}

/// Invitation redemption; the token in the path is the only credential.
pub fn init_activation_router() -> Router<AppState> {
    Router::new().route("/activate/{token}", put(activate_user))
}
