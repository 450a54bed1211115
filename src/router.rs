use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware};
use scribe_observability::{MetricsHandle, logging_middleware, metrics_app, metrics_middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::api_doc;
use crate::middleware::auth::require_auth;
use crate::middleware::basic::require_basic_auth;
use crate::modules::auth::router::init_auth_router;
use crate::modules::comments::router::init_comments_router;
use crate::modules::feed::router::init_feed_router;
use crate::modules::health::router::init_health_router;
use crate::modules::posts::router::init_posts_router;
use crate::modules::users::router::{init_activation_router, init_users_router};
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1_048_576;

pub fn init_router(state: AppState, metrics: Option<MetricsHandle>) -> Router {
    let doc = api_doc(&state.config.server.api_url);

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc.clone()))
        .merge(Scalar::with_url("/scalar", doc))
        .merge(init_health_router().route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        )))
        .nest("/feed", init_feed_router())
        .nest("/authentication", init_auth_router())
        .nest(
            "/posts",
            init_posts_router()
                .nest("/comments", init_comments_router())
                .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .nest(
            "/users",
            init_users_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
                .merge(init_activation_router()),
        )
        .with_state(state.clone());

    if let Some(handle) = metrics {
        app = app.merge(metrics_app(handle));
    }

    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .config
                .cors
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
        })
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.server.request_timeout,
        ))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
