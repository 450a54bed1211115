use std::time::Duration;

use async_trait::async_trait;
use scribe_models::Role;
use sqlx::PgPool;
use tracing::instrument;

use super::timed;
use crate::error::StoreError;
use crate::store::RoleStore;

#[derive(Debug, Clone)]
pub struct PgRoleStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgRoleStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> Result<Role, StoreError> {
        timed(self.timeout, async {
            sqlx::query_as::<_, Role>(
                "SELECT id, name, level, description FROM roles WHERE name = $1",
            )
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
        })
        .await
    }
}
