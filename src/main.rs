use anyhow::Context;
use dotenvy::dotenv;
use scribe::router::init_router;
use scribe::state::init_app_state;
use scribe_config::AppConfig;
use scribe_observability::{init_metrics, init_tracing, shutdown_tracer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;
    let metrics = init_metrics()?;

    let config = AppConfig::from_env();
    if config.token.secret.is_empty() {
        tracing::warn!("TOKEN_SECRET is empty; logins will fail until it is set");
    }

    let addr = config.server.addr.clone();
    let api_url = config.server.api_url.clone();

    let state = init_app_state(config).await?;
    let app = init_router(state, metrics);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "server listening");
    println!("🚀 Server running on http://{api_url}");
    println!("📚 Swagger UI available at http://{api_url}/swagger-ui");
    println!("📖 Scalar UI available at http://{api_url}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
