//! # Scribe Models
//!
//! Domain models and request/response DTOs for the Scribe API.
//!
//! - [`roles`]: roles and their precedence levels
//! - [`users`]: users, registration and profile updates
//! - [`auth`]: login payload
//! - [`posts`]: posts and their versioned partial updates
//! - [`comments`]: comments and the feed view of a post
//!
//! Request DTOs reject unknown fields and carry `validator` rules; the
//! HTTP layer runs both before a handler sees the value.

pub mod auth;
pub mod comments;
pub mod posts;
pub mod roles;
pub mod users;

pub use auth::LoginRequest;
pub use comments::{Comment, CommentAuthor, CreateCommentRequest, NewComment, PostWithComments};
pub use posts::{CreatePostRequest, NewPost, Owned, Post, UpdatePostRequest};
pub use roles::{Role, system_roles};
pub use users::{NewUser, RegisterUserRequest, UpdateUserRequest, User, UserWithToken};
