use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use scribe_core::ErrorDetail;
use tracing::{error, info, warn};

/// Logs every request once it completes.
///
/// Each request gets a fresh id. The level follows the status class, and
/// the [`ErrorDetail`] attached by `AppError` is logged alongside 4xx/5xx
/// responses so the client-facing message can stay generic.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    let response = next.run(req).await;
    let latency = start.elapsed();
    let status = response.status();
    let detail = response
        .extensions()
        .get::<ErrorDetail>()
        .map(|d| d.0.as_str())
        .unwrap_or("");

    match status.as_u16() {
        400..=499 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = status.as_u16(),
                latency_ms = latency.as_millis() as u64,
                error = %detail,
                "Client error"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = status.as_u16(),
                latency_ms = latency.as_millis() as u64,
                error = %detail,
                "Server error"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = status.as_u16(),
                latency_ms = latency.as_millis() as u64,
                "Request completed"
            );
        }
    }

    response
}
