//! Storage capabilities.
//!
//! Each trait covers one resource. Implementations must be safe to call
//! from many request tasks at once; multi-row mutations are atomic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Duration as Ttl;
use scribe_models::{Comment, NewComment, NewPost, NewUser, Post, Role, User};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::postgres::{PgCommentStore, PgPostStore, PgRoleStore, PgUserStore};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts an inactive user and its invitation in one transaction.
    ///
    /// Only the hash of `plain_token` is stored. The invitation expires
    /// `ttl` from now.
    async fn create_and_invite(
        &self,
        user: NewUser,
        plain_token: &str,
        ttl: Ttl,
    ) -> Result<User, StoreError>;

    /// Inserts a user without an invitation.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError>;

    /// Looks up an **active** user by username.
    async fn get_by_username(&self, username: &str) -> Result<User, StoreError>;

    /// Looks up a user by username whether or not it is active.
    async fn find_by_username(&self, username: &str) -> Result<User, StoreError>;

    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Persists `user.username` and `user.email`; returns the stored row.
    async fn update(&self, user: &User) -> Result<User, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Redeems an invitation: marks its user active and deletes the user's
    /// invitations. Unknown or expired tokens leave everything untouched.
    async fn activate(&self, plain_token: &str) -> Result<(), StoreError>;

    async fn set_role(&self, id: Uuid, role: &str) -> Result<User, StoreError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Post, StoreError>;

    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// Writes `post` only if the stored version still equals `post.version`.
    ///
    /// On success the stored version is incremented by one and `post` is
    /// refreshed with the new version and `updated_at`. A stale version or a
    /// missing row yields [`StoreError::NotFound`].
    async fn update(&self, post: &mut Post) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Fails with [`StoreError::NotFound`] when the post does not exist.
    async fn create(&self, comment: NewComment) -> Result<Comment, StoreError>;

    /// Comments on a post, newest first.
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, StoreError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn get_by_name(&self, name: &str) -> Result<Role, StoreError>;
}

/// Every storage capability the API needs, shared behind `Arc`s.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    pub roles: Arc<dyn RoleStore>,
}

impl Storage {
    /// PostgreSQL-backed storage; every call is bounded by `query_timeout`.
    pub fn postgres(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone(), query_timeout)),
            posts: Arc::new(PgPostStore::new(pool.clone(), query_timeout)),
            comments: Arc::new(PgCommentStore::new(pool.clone(), query_timeout)),
            roles: Arc::new(PgRoleStore::new(pool, query_timeout)),
        }
    }

    /// Fresh in-memory storage with the seeded roles.
    #[cfg(any(test, feature = "memory"))]
    pub fn in_memory() -> Self {
        let store = Arc::new(crate::memory::MemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            roles: store,
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
