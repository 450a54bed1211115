#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use axum_extra::headers::{Authorization, HeaderMapExt};
use http_body_util::BodyExt;
use scribe::router::init_router;
use scribe::state::AppState;
use scribe_auth::Claims;
use scribe_config::{
    AppConfig, BasicAuthConfig, CorsConfig, DatabaseConfig, InvitationConfig, ServerConfig,
    TokenConfig,
};
use scribe_core::hash_password;
use scribe_db::Storage;
use scribe_models::{NewUser, User};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const BASIC_USER: &str = "ops";
pub const BASIC_PASSWORD: &str = "ops-password";
pub const TEST_PASSWORD: &str = "pw1234";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig::default(),
        token: TokenConfig {
            secret: TEST_SECRET.to_string(),
            expiry: 3600,
            issuer: "scribe".to_string(),
            audience: "scribe".to_string(),
        },
        basic_auth: BasicAuthConfig {
            username: BASIC_USER.to_string(),
            password: BASIC_PASSWORD.to_string(),
        },
        invitation: InvitationConfig::default(),
        cors: CorsConfig::default(),
    }
}

/// Router over fresh in-memory storage.
pub fn setup_test_app() -> (Router, AppState) {
    setup_test_app_with(test_config())
}

pub fn setup_test_app_with(config: AppConfig) -> (Router, AppState) {
    let state = AppState::new(config, Storage::in_memory());
    (init_router(state.clone(), None), state)
}

pub struct TestUser {
    pub user: User,
    pub token: String,
}

/// Stores an active user with `role` and signs a token for them.
pub async fn create_test_user(state: &AppState, username: &str, role: &str) -> TestUser {
    let user = state
        .storage
        .users
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    let token = token_for(state, user.id);
    TestUser { user, token }
}

pub fn token_for(state: &AppState, user_id: Uuid) -> String {
    state
        .authenticator
        .generate_token(&Claims::new(user_id, &state.config.token))
        .unwrap()
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn basic_request(uri: &str, username: &str, password: &str) -> Request<Body> {
    let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    request
        .headers_mut()
        .typed_insert(Authorization::basic(username, password));
    request
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Sends `request` and parses the body as JSON (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
