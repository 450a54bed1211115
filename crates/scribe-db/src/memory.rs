//! In-memory storage.
//!
//! A single async mutex guards all state and is held for the whole of each
//! operation, so multi-row mutations are atomic and versioned updates are
//! serialized exactly like the conditional `UPDATE` in PostgreSQL.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Duration as Ttl, Utc};
use scribe_models::{
    Comment, CommentAuthor, NewComment, NewPost, NewUser, Post, Role, User, system_roles,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::StoreError;
use crate::invitation::hash_token;
use crate::store::{CommentStore, PostStore, RoleStore, UserStore};

#[derive(Debug)]
struct Invitation {
    user_id: Uuid,
    expiry: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    roles: Vec<Role>,
    users: HashMap<Uuid, User>,
    /// Keyed by token hash.
    invitations: HashMap<String, Invitation>,
    posts: BTreeMap<i64, Post>,
    comments: Vec<Comment>,
    next_post_id: i64,
    next_comment_id: i64,
}

impl State {
    fn role(&self, name: &str) -> Result<Role, StoreError> {
        self.roles
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Username is checked across every user before email, the same order
    /// the unique constraints are declared in.
    fn check_unique(&self, id: Uuid, username: &str, email: &str) -> Result<(), StoreError> {
        let others = || self.users.values().filter(move |u| u.id != id);
        if others().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername);
        }
        if others().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        Ok(())
    }

    fn insert_user(&mut self, user: NewUser) -> Result<User, StoreError> {
        let role = self.role(&user.role)?;
        let id = Uuid::new_v4();
        self.check_unique(id, &user.username, &user.email)?;

        let now = Utc::now();
        let created = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_active: user.is_active,
            role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, created.clone());
        Ok(created)
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Empty store holding only the seeded roles.
    pub fn new() -> Self {
        let roles = system_roles::SEEDED
            .iter()
            .enumerate()
            .map(|(i, (name, level, description))| Role {
                id: i as i64 + 1,
                name: name.to_string(),
                level: *level,
                description: description.to_string(),
            })
            .collect();

        Self {
            state: Mutex::new(State {
                roles,
                next_post_id: 1,
                next_comment_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Moves an invitation's expiry, for exercising the expired path.
    pub async fn set_invitation_expiry(&self, plain_token: &str, expiry: DateTime<Utc>) -> bool {
        let mut state = self.state.lock().await;
        match state.invitations.get_mut(&hash_token(plain_token)) {
            Some(invitation) => {
                invitation.expiry = expiry;
                true
            }
            None => false,
        }
    }

    pub async fn invitation_count(&self) -> usize {
        self.state.lock().await.invitations.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_and_invite(
        &self,
        user: NewUser,
        plain_token: &str,
        ttl: Ttl,
    ) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;
        let created = state.insert_user(user)?;
        state.invitations.insert(
            hash_token(plain_token),
            Invitation {
                user_id: created.id,
                expiry: Utc::now() + ttl,
            },
        );
        Ok(created)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        self.state.lock().await.insert_user(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        let state = self.state.lock().await;
        state.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_by_username(&self, username: &str) -> Result<User, StoreError> {
        let state = self.state.lock().await;
        state
            .users
            .values()
            .find(|u| u.username == username && u.is_active)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        let state = self.state.lock().await;
        state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;
        state.check_unique(user.id, &user.username, &user.email)?;

        let stored = state.users.get_mut(&user.id).ok_or(StoreError::NotFound)?;
        stored.username = user.username.clone();
        stored.email = user.email.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.users.remove(&id).ok_or(StoreError::NotFound)?;

        state.invitations.retain(|_, inv| inv.user_id != id);
        let removed_posts: Vec<i64> = state
            .posts
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        state.posts.retain(|_, p| p.user_id != id);
        state
            .comments
            .retain(|c| c.user_id != id && !removed_posts.contains(&c.post_id));
        Ok(())
    }

    async fn activate(&self, plain_token: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();

        let user_id = match state.invitations.get(&hash_token(plain_token)) {
            Some(invitation) if invitation.expiry > now => invitation.user_id,
            _ => return Err(StoreError::NotFound),
        };

        let user = state.users.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        user.is_active = true;
        user.updated_at = now;
        state.invitations.retain(|_, inv| inv.user_id != user_id);
        Ok(())
    }

    async fn set_role(&self, id: Uuid, role: &str) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;
        let role = state.role(role)?;

        let user = state.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut state = self.state.lock().await;
        let id = state.next_post_id;
        state.next_post_id += 1;

        let now = Utc::now();
        let created = Post {
            id,
            title: post.title,
            text: post.text,
            user_id: post.user_id,
            tags: post.tags,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<Post, StoreError> {
        let state = self.state.lock().await;
        state.posts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let state = self.state.lock().await;
        let mut posts: Vec<Post> = state.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn update(&self, post: &mut Post) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let stored = match state.posts.get_mut(&post.id) {
            Some(stored) if stored.version == post.version => stored,
            _ => return Err(StoreError::NotFound),
        };

        stored.title = post.title.clone();
        stored.text = post.text.clone();
        stored.tags = post.tags.clone();
        stored.version += 1;
        stored.updated_at = Utc::now();

        post.version = stored.version;
        post.updated_at = stored.updated_at;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.posts.remove(&id).ok_or(StoreError::NotFound)?;
        state.comments.retain(|c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut state = self.state.lock().await;
        if !state.posts.contains_key(&comment.post_id) {
            return Err(StoreError::NotFound);
        }
        let username = state
            .users
            .get(&comment.user_id)
            .map(|u| u.username.clone())
            .ok_or(StoreError::NotFound)?;

        let id = state.next_comment_id;
        state.next_comment_id += 1;

        let created = Comment {
            id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: Utc::now(),
            user: CommentAuthor {
                id: comment.user_id,
                username,
            },
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, StoreError> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(comments)
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn get_by_name(&self, name: &str) -> Result<Role, StoreError> {
        self.state.lock().await.role(name)
    }
}
