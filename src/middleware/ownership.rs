use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use scribe_core::AppError;
use scribe_db::{RoleStore, StoreError};
use scribe_models::{Owned, Post, User, system_roles};
use scribe_observability::track_authorization_check;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedPath;

/// Allows the owner of `resource`, or anyone whose role level reaches
/// `required_role`.
///
/// A `required_role` missing from storage is a server misconfiguration and
/// yields a 500.
pub async fn check_ownership_or_role(
    roles: &dyn RoleStore,
    required_role: &str,
    resource: &impl Owned,
    user: &User,
) -> Result<(), AppError> {
    if resource.owner_id() == user.id {
        track_authorization_check(true, &user.role.name);
        return Ok(());
    }

    let required = roles.get_by_name(required_role).await.map_err(|e| match e {
        StoreError::NotFound => {
            AppError::internal(anyhow!("required role '{required_role}' is not configured"))
        }
        other => other.into(),
    })?;

    let allowed = user.role.satisfies(&required);
    track_authorization_check(allowed, &user.role.name);

    if !allowed {
        return Err(AppError::forbidden(anyhow!(
            "user {} with role {} (level {}) is below {} (level {})",
            user.id,
            user.role.name,
            user.role.level,
            required.name,
            required.level
        )));
    }
    Ok(())
}

/// A post the caller may modify, loaded from the `{postID}` path segment.
#[derive(Debug, Clone)]
pub struct AuthorizedPost {
    pub post: Post,
    pub user: User,
}

impl FromRequestParts<AppState> for AuthorizedPost {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        let ValidatedPath(post_id) = ValidatedPath::<i64>::from_request_parts(parts, state).await?;

        let post = state.storage.posts.get_by_id(post_id).await?;

        check_ownership_or_role(
            state.storage.roles.as_ref(),
            system_roles::ADMIN,
            &post,
            &user,
        )
        .await?;

        Ok(AuthorizedPost { post, user })
    }
}

/// The user named by the `{userID}` path segment.
#[derive(Debug, Clone)]
pub struct UserContext(pub User);

impl FromRequestParts<AppState> for UserContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ValidatedPath(user_id) = ValidatedPath::<Uuid>::from_request_parts(parts, state).await?;
        let user = state.storage.users.get_by_id(user_id).await?;
        Ok(UserContext(user))
    }
}
