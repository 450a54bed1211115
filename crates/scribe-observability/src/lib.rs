//! Scribe Observability
//!
//! Structured logging, distributed tracing and metrics for the Scribe API:
//! - Request logging middleware (always compiled)
//! - Console, rolling file and JSON logs plus optional OTLP export
//! - Prometheus metrics and business counters
//!
//! File logs, OpenTelemetry and metrics live behind the `observability`
//! feature (on by default). At runtime `OBSERVABILITY_ENABLED=false` turns
//! them off and leaves console logging only.
//!
//! # Examples
//!
//! ```no_run
//! use scribe_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

pub mod basic_logging;
pub mod middleware;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

use std::sync::OnceLock;

pub use middleware::logging_middleware;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    MetricsHandle, init_metrics, metrics_app, metrics_middleware, track_authorization_check,
    track_login_failure, track_login_success, track_post_created, track_post_version_conflict,
    track_token_issued, track_user_activated, track_user_registered,
};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether file logs, tracing export and metrics are active.
///
/// Reads `OBSERVABILITY_ENABLED` once; anything but `false`/`0` enables.
/// Always false when the `observability` feature is not compiled in.
pub fn is_observability_enabled() -> bool {
    cfg!(feature = "observability")
        && *OBSERVABILITY_ENABLED.get_or_init(|| {
            std::env::var("OBSERVABILITY_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true)
        })
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Placeholder for the Prometheus handle.
    #[derive(Debug, Clone)]
    pub struct MetricsHandle;

    /// Console logging only.
    pub fn init_tracing() -> anyhow::Result<()> {
        crate::basic_logging::init_basic_console_logging()
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> anyhow::Result<Option<MetricsHandle>> {
        Ok(None)
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn metrics_app<S>(_handle: MetricsHandle) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        Router::new()
    }

    pub fn track_user_registered() {}
    pub fn track_user_activated() {}
    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_token_issued() {}
    pub fn track_post_created() {}
    pub fn track_post_version_conflict() {}
    pub fn track_authorization_check(_allowed: bool, _role: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
