use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use scribe_config::BasicAuthConfig;
use scribe_core::AppError;

use crate::state::AppState;

const CHALLENGE: &str = r#"Basic realm="Restricted", charset="UTF-8""#;

fn credentials_match(basic: &Basic, config: &BasicAuthConfig) -> bool {
    !config.password.is_empty()
        && basic.username() == config.username
        && basic.password() == config.password
}

/// Guards operational endpoints with HTTP Basic authentication.
///
/// Failures carry a `WWW-Authenticate` challenge so clients can prompt for
/// credentials. An empty configured password rejects everyone.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .typed_get::<Authorization<Basic>>()
        .is_some_and(|Authorization(basic)| credentials_match(&basic, &state.config.basic_auth));

    if !authorized {
        tracing::warn!(path = %req.uri().path(), "basic authentication failed");
        let mut response =
            AppError::unauthorized(anyhow!("invalid basic credentials")).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
        return response;
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(password: &str) -> BasicAuthConfig {
        BasicAuthConfig {
            username: "ops".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_credentials_match() {
        let basic = Authorization::basic("ops", "hunter22").0;
        assert!(credentials_match(&basic, &config("hunter22")));
        assert!(!credentials_match(&basic, &config("other")));

        let wrong_user = Authorization::basic("root", "hunter22").0;
        assert!(!credentials_match(&wrong_user, &config("hunter22")));
    }

    #[test]
    fn test_empty_password_never_matches() {
        let basic = Authorization::basic("ops", "").0;
        assert!(!credentials_match(&basic, &config("")));
    }
}
