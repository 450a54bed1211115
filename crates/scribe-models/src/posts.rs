//! Post models and DTOs.
//!
//! Every post carries a `version` that starts at 1 and is bumped by exactly
//! one on each successful update. Updates name the version they were based
//! on; the store rejects them when that version is no longer current.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A resource owned by exactly one user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub user_id: Uuid,
    pub tags: Vec<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// Fields supplied when inserting a post; the store assigns the rest.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub user_id: Uuid,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 100, message = "title is required and must be at most 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 1000, message = "text is required and must be at most 1000 characters"))]
    pub text: String,
    #[validate(length(min = 1, message = "at least one tag is required"))]
    pub tags: Vec<String>,
}

/// Partial post update.
///
/// `version`, when present, pins the update to the version the client last
/// read. Without it the update is based on the version loaded for this
/// request.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    #[validate(length(max = 100, message = "title must be at most 100 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "text must be at most 1000 characters"))]
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
    pub version: Option<i32>,
}

impl Post {
    /// Overwrites the fields present in `update`, including the expected version.
    pub fn apply(&mut self, update: UpdatePostRequest) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(version) = update.version {
            self.version = version;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 1,
            title: "Hello".to_string(),
            text: "First post".to_string(),
            user_id: Uuid::new_v4(),
            tags: vec!["intro".to_string()],
            version: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_partial_update() {
        let mut post = sample_post();
        post.apply(UpdatePostRequest {
            title: Some("Renamed".to_string()),
            ..Default::default()
        });

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.text, "First post");
        assert_eq!(post.tags, vec!["intro".to_string()]);
        assert_eq!(post.version, 3);
    }

    #[test]
    fn test_apply_keeps_explicit_empty_string() {
        let mut post = sample_post();
        post.apply(UpdatePostRequest {
            text: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(post.text, "");
    }

    #[test]
    fn test_apply_pins_client_version() {
        let mut post = sample_post();
        post.apply(UpdatePostRequest {
            version: Some(1),
            ..Default::default()
        });
        assert_eq!(post.version, 1);
    }

    #[test]
    fn test_owner_is_author() {
        let post = sample_post();
        assert_eq!(post.owner_id(), post.user_id);
    }

    #[test]
    fn test_create_requires_title_text_and_tags() {
        let ok = CreatePostRequest {
            title: "t".to_string(),
            text: "x".to_string(),
            tags: vec!["a".to_string()],
        };
        assert!(ok.validate().is_ok());

        assert!(
            CreatePostRequest {
                tags: vec![],
                ..ok.clone()
            }
            .validate()
            .is_err()
        );
        assert!(
            CreatePostRequest {
                title: String::new(),
                ..ok.clone()
            }
            .validate()
            .is_err()
        );
        assert!(
            CreatePostRequest {
                text: String::new(),
                ..ok
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_update_limits() {
        let too_long = UpdatePostRequest {
            title: Some("a".repeat(101)),
            ..Default::default()
        };
        assert!(too_long.validate().is_err());
        assert!(UpdatePostRequest::default().validate().is_ok());
    }
}
