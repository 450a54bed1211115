use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scribe_models::{NewPost, Post};
use sqlx::PgPool;
use tracing::instrument;

use super::timed;
use crate::error::StoreError;
use crate::store::PostStore;

const POST_COLUMNS: &str = "id, title, text, user_id, tags, version, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgPostStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    #[instrument(skip(self, post), fields(user_id = %post.user_id))]
    async fn create(&self, post: NewPost) -> Result<Post, StoreError> {
        timed(self.timeout, async {
            let post = sqlx::query_as::<_, Post>(&format!(
                "INSERT INTO posts (title, text, user_id, tags)
                 VALUES ($1, $2, $3, $4)
                 RETURNING {POST_COLUMNS}"
            ))
            .bind(&post.title)
            .bind(&post.text)
            .bind(post.user_id)
            .bind(&post.tags)
            .fetch_one(&self.pool)
            .await?;

            Ok(post)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Post, StoreError> {
        timed(self.timeout, async {
            sqlx::query_as::<_, Post>(&format!(
                "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        timed(self.timeout, async {
            let posts = sqlx::query_as::<_, Post>(&format!(
                "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(&self.pool)
            .await?;

            Ok(posts)
        })
        .await
    }

    #[instrument(skip(self, post), fields(post_id = post.id, expected_version = post.version))]
    async fn update(&self, post: &mut Post) -> Result<(), StoreError> {
        let row = timed(self.timeout, async {
            let row = sqlx::query_as::<_, (i32, DateTime<Utc>)>(
                "UPDATE posts
                 SET title = $1, text = $2, tags = $3, updated_at = now(), version = version + 1
                 WHERE id = $4 AND version = $5
                 RETURNING version, updated_at",
            )
            .bind(&post.title)
            .bind(&post.text)
            .bind(&post.tags)
            .bind(post.id)
            .bind(post.version)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row)
        })
        .await?;

        let (version, updated_at) = row.ok_or(StoreError::NotFound)?;
        post.version = version;
        post.updated_at = updated_at;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        timed(self.timeout, async {
            let result = sqlx::query("DELETE FROM posts WHERE id = $1")
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
}
