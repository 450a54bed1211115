use std::sync::Arc;

use anyhow::Context;
use scribe_auth::{Authenticator, JwtAuthenticator};
use scribe_config::AppConfig;
use scribe_db::{Storage, init_db_pool};

/// Shared, immutable application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Storage,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// State over an existing storage, signing tokens with `config.token`.
    pub fn new(config: AppConfig, storage: Storage) -> Self {
        let authenticator = Arc::new(JwtAuthenticator::new(&config.token));
        Self {
            config: Arc::new(config),
            storage,
            authenticator,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Connects to PostgreSQL, applies pending migrations and builds the state.
pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db_pool(&config.database)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let storage = Storage::postgres(pool, config.database.query_timeout);
    Ok(AppState::new(config, storage))
}
