use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scribe_models::{Comment, CommentAuthor, NewComment};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::timed;
use crate::error::StoreError;
use crate::store::CommentStore;

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    username: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
            user: CommentAuthor {
                id: row.user_id,
                username: row.username,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgCommentStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgCommentStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    #[instrument(skip(self, comment), fields(post_id = comment.post_id, user_id = %comment.user_id))]
    async fn create(&self, comment: NewComment) -> Result<Comment, StoreError> {
        timed(self.timeout, async {
            // The insert only happens when the post exists.
            let row = sqlx::query_as::<_, CommentRow>(
                "WITH target AS (
                     SELECT id FROM posts WHERE id = $1
                 ), inserted AS (
                     INSERT INTO comments (post_id, user_id, content)
                     SELECT id, $2, $3 FROM target
                     RETURNING id, post_id, user_id, content, created_at
                 )
                 SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, u.username
                 FROM inserted c
                 JOIN users u ON u.id = c.user_id",
            )
            .bind(comment.post_id)
            .bind(comment.user_id)
            .bind(&comment.content)
            .fetch_optional(&self.pool)
            .await?;

            row.map(Comment::from).ok_or(StoreError::NotFound)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        timed(self.timeout, async {
            let rows = sqlx::query_as::<_, CommentRow>(
                "SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, u.username
                 FROM comments c
                 JOIN users u ON u.id = c.user_id
                 WHERE c.post_id = $1
                 ORDER BY c.created_at DESC, c.id DESC",
            )
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;

            Ok(rows.into_iter().map(Comment::from).collect())
        })
        .await
    }
}
