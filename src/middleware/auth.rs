use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use scribe_core::AppError;
use scribe_models::User;

use crate::state::AppState;

/// The authenticated caller, loaded fresh from storage for every request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Resolves the bearer token in `headers` to a stored user.
///
/// Every failure is a 401; the reason is logged, never returned.
pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<User, AppError> {
    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        tracing::warn!("missing or malformed bearer authorization header");
        return Err(AppError::unauthorized(anyhow!(
            "missing or malformed authorization header"
        )));
    };

    let claims = state
        .authenticator
        .validate_token(bearer.token())
        .map_err(|e| {
            tracing::warn!(error = %e, "token validation failed");
            AppError::unauthorized(e)
        })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!(error = %e, "token subject is not a user id");
        AppError::unauthorized(e)
    })?;

    state.storage.users.get_by_id(user_id).await.map_err(|e| {
        tracing::warn!(%user_id, error = %e, "token subject could not be loaded");
        AppError::unauthorized(e)
    })
}

/// Route layer that rejects requests without a valid bearer token.
///
/// On success the caller is stored as an [`AuthUser`] extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(req.headers(), &state).await?;
    req.extensions_mut().insert(AuthUser(user));
    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&parts.headers, state).await?;
        parts.extensions.insert(AuthUser(user.clone()));
        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode, header};
    use scribe_auth::Claims;
    use scribe_config::AppConfig;
    use scribe_db::Storage;
    use scribe_models::{NewUser, system_roles};
    use uuid::Uuid;

    fn test_state() -> AppState {
        let mut config = AppConfig::from_env();
        config.token.secret = "auth-middleware-test-secret".to_string();
        AppState::new(config, Storage::in_memory())
    }

    async fn stored_user(state: &AppState) -> User {
        state
            .storage
            .users
            .create(NewUser {
                username: "carol".to_string(),
                email: "carol@x.com".to_string(),
                password_hash: "hash".to_string(),
                role: system_roles::USER.to_string(),
                is_active: true,
            })
            .await
            .unwrap()
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_valid_token_loads_user() {
        let state = test_state();
        let user = stored_user(&state).await;
        let token = state
            .authenticator
            .generate_token(&Claims::new(user.id, &state.config.token))
            .unwrap();

        let authenticated = authenticate(&bearer(&token), &state).await.unwrap();
        assert_eq!(authenticated.id, user.id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let state = test_state();
        let err = authenticate(&HeaderMap::new(), &state).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let state = test_state();
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Token abc"));

        let err = authenticate(&headers, &state).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthorized() {
        let state = test_state();
        let token = state
            .authenticator
            .generate_token(&Claims::new(Uuid::new_v4(), &state.config.token))
            .unwrap();

        let err = authenticate(&bearer(&token), &state).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.client_message(), "unauthorized");
    }

    #[tokio::test]
    async fn test_non_uuid_subject_is_unauthorized() {
        let state = test_state();
        let mut claims = Claims::new(Uuid::new_v4(), &state.config.token);
        claims.sub = "42".to_string();
        let token = state.authenticator.generate_token(&claims).unwrap();

        let err = authenticate(&bearer(&token), &state).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
