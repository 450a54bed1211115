use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as Ttl, Utc};
use scribe_models::{NewUser, Role, User};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::timed;
use crate::error::StoreError;
use crate::invitation::hash_token;
use crate::store::UserStore;

const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password_hash, u.is_active, \
     u.created_at, u.updated_at, r.id AS role_id, r.name AS role_name, \
     r.level AS role_level, r.description AS role_description";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    role_id: i64,
    role_name: String,
    role_level: i32,
    role_description: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            is_active: row.is_active,
            role: Role {
                id: row.role_id,
                name: row.role_name,
                level: row.role_level,
                description: row.role_description,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self, user, plain_token), fields(username = %user.username))]
    async fn create_and_invite(
        &self,
        user: NewUser,
        plain_token: &str,
        ttl: Ttl,
    ) -> Result<User, StoreError> {
        let token_hash = hash_token(plain_token);
        let expiry = Utc::now() + ttl;

        timed(self.timeout, async {
            let mut tx = self.pool.begin().await?;

            let created = insert_user(&mut tx, &user).await?;

            sqlx::query("INSERT INTO user_invitations (token, user_id, expiry) VALUES ($1, $2, $3)")
                .bind(&token_hash)
                .bind(created.id)
                .bind(expiry)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok(created)
        })
        .await
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        timed(self.timeout, async {
            let mut tx = self.pool.begin().await?;
            let created = insert_user(&mut tx, &user).await?;
            tx.commit().await?;
            Ok(created)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        timed(self.timeout, async {
            sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {USER_COLUMNS}
                 FROM users u
                 JOIN roles r ON r.id = u.role_id
                 WHERE u.id = $1"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> Result<User, StoreError> {
        timed(self.timeout, async {
            sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {USER_COLUMNS}
                 FROM users u
                 JOIN roles r ON r.id = u.role_id
                 WHERE u.username = $1 AND u.is_active = TRUE"
            ))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        timed(self.timeout, async {
            sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {USER_COLUMNS}
                 FROM users u
                 JOIN roles r ON r.id = u.role_id
                 WHERE u.username = $1"
            ))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        timed(self.timeout, async {
            let rows = sqlx::query_as::<_, UserRow>(&format!(
                "SELECT {USER_COLUMNS}
                 FROM users u
                 JOIN roles r ON r.id = u.role_id
                 ORDER BY u.created_at, u.username"
            ))
            .fetch_all(&self.pool)
            .await?;

            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> Result<User, StoreError> {
        timed(self.timeout, async {
            sqlx::query_as::<_, UserRow>(&format!(
                "WITH u AS (
                     UPDATE users
                     SET username = $1, email = $2, updated_at = now()
                     WHERE id = $3
                     RETURNING *
                 )
                 SELECT {USER_COLUMNS}
                 FROM u
                 JOIN roles r ON r.id = u.role_id"
            ))
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        timed(self.timeout, async {
            let result = sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, plain_token))]
    async fn activate(&self, plain_token: &str) -> Result<(), StoreError> {
        let token_hash = hash_token(plain_token);

        timed(self.timeout, async {
            let mut tx = self.pool.begin().await?;

            let user_id = sqlx::query_scalar::<_, Uuid>(
                "SELECT u.id
                 FROM users u
                 JOIN user_invitations ui ON ui.user_id = u.id
                 WHERE ui.token = $1 AND ui.expiry > $2",
            )
            .bind(&token_hash)
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound)?;

            sqlx::query("UPDATE users SET is_active = TRUE, updated_at = now() WHERE id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query("DELETE FROM user_invitations WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: Uuid, role: &str) -> Result<User, StoreError> {
        timed(self.timeout, async {
            let mut tx = self.pool.begin().await?;

            let role_id = sqlx::query_scalar::<_, i64>("SELECT id FROM roles WHERE name = $1")
                .bind(role)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StoreError::NotFound)?;

            let result = sqlx::query(
                "UPDATE users SET role_id = $1, updated_at = now() WHERE id = $2",
            )
            .bind(role_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound);
            }

            let user = select_user(&mut tx, id).await?;
            tx.commit().await?;
            Ok(user)
        })
        .await
    }
}

/// Inserts `user` with its role resolved by name and returns the joined row.
async fn insert_user(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user: &NewUser,
) -> Result<User, StoreError> {
    let role_id = sqlx::query_scalar::<_, i64>("SELECT id FROM roles WHERE name = $1")
        .bind(&user.role)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StoreError::NotFound)?;

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, is_active, role_id)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.is_active)
    .bind(role_id)
    .execute(&mut **tx)
    .await?;

    select_user(tx, id).await
}

async fn select_user(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
) -> Result<User, StoreError> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS}
         FROM users u
         JOIN roles r ON r.id = u.role_id
         WHERE u.id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .map(User::from)
    .ok_or(StoreError::NotFound)
}
