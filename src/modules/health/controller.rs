use axum::Json;

use super::service::{HealthService, HealthStatus};
use crate::modules::auth::controller::ErrorResponse;

/// Liveness probe
///
/// Protected by HTTP Basic authentication.
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus),
        (status = 401, description = "Missing or wrong basic credentials", body = ErrorResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Ops"
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthService::status())
}
