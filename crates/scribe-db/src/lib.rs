//! # Scribe DB
//!
//! Persistence for the Scribe API.
//!
//! Handlers never talk to the database directly. They go through the
//! capability traits in [`store`] ([`UserStore`], [`PostStore`],
//! [`CommentStore`], [`RoleStore`]), bundled together in [`Storage`]:
//!
//! - [`postgres`]: the production implementation on a [`PgPool`], with a
//!   bounded timeout around every call
//! - `memory`: a mutex-guarded in-memory implementation (feature `memory`)
//!
//! # Example
//!
//! ```ignore
//! use scribe_config::DatabaseConfig;
//! use scribe_db::{Storage, init_db_pool};
//!
//! let config = DatabaseConfig::from_env();
//! let pool = init_db_pool(&config).await?;
//! let storage = Storage::postgres(pool, config.query_timeout);
//! let post = storage.posts.get_by_id(42).await?;
//! ```

pub mod error;
pub mod invitation;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod postgres;
pub mod store;

use scribe_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use store::{CommentStore, PostStore, RoleStore, Storage, UserStore};

/// Builds the PostgreSQL connection pool from `config`.
///
/// Connections are opened lazily up to `max_connections`; idle ones are
/// closed after `max_idle_time`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .idle_timeout(config.max_idle_time)
        .acquire_timeout(config.query_timeout)
        .connect(&config.url)
        .await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
