use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    /// RFC 3339 server time.
    pub time: String,
    pub version: String,
    pub message: String,
}

pub struct HealthService;

impl HealthService {
    pub fn status() -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version: VERSION.to_string(),
            message: "API is running and ready to accept requests".to_string(),
        }
    }
}
