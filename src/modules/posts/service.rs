use anyhow::anyhow;
use scribe_core::AppError;
use scribe_db::{Storage, StoreError};
use scribe_models::{CreatePostRequest, NewPost, Post, UpdatePostRequest, User};
use scribe_observability::{track_post_created, track_post_version_conflict};
use tracing::instrument;

pub struct PostService;

impl PostService {
    #[instrument(skip(storage, author, dto), fields(user_id = %author.id))]
    pub async fn create_post(
        storage: &Storage,
        author: &User,
        dto: CreatePostRequest,
    ) -> Result<Post, AppError> {
        let post = storage
            .posts
            .create(NewPost {
                title: dto.title,
                text: dto.text,
                user_id: author.id,
                tags: dto.tags,
            })
            .await?;

        track_post_created();
        Ok(post)
    }

    /// Applies a partial update against the version the client based it on.
    ///
    /// A stale version is reported exactly like a missing post.
    #[instrument(skip(storage, post, dto), fields(post_id = post.id))]
    pub async fn update_post(
        storage: &Storage,
        mut post: Post,
        dto: UpdatePostRequest,
    ) -> Result<Post, AppError> {
        post.apply(dto);
        let expected = post.version;

        match storage.posts.update(&mut post).await {
            Ok(()) => Ok(post),
            Err(StoreError::NotFound) => {
                track_post_version_conflict();
                Err(AppError::not_found(anyhow!(
                    "post {} has no version {expected}",
                    post.id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(storage))]
    pub async fn delete_post(storage: &Storage, id: i64) -> Result<(), AppError> {
        storage.posts.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use scribe_models::{NewUser, system_roles};

    async fn author(storage: &Storage) -> User {
        storage
            .users
            .create(NewUser {
                username: "dana".to_string(),
                email: "dana@x.com".to_string(),
                password_hash: String::new(),
                role: system_roles::USER.to_string(),
                is_active: true,
            })
            .await
            .unwrap()
    }

    fn create_request() -> CreatePostRequest {
        CreatePostRequest {
            title: "First".to_string(),
            text: "Hello".to_string(),
            tags: vec!["intro".to_string()],
        }
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let storage = Storage::in_memory();
        let author = author(&storage).await;
        let post = PostService::create_post(&storage, &author, create_request())
            .await
            .unwrap();

        let updated = PostService::update_post(
            &storage,
            post,
            UpdatePostRequest {
                title: Some("Edited".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.version, 2);
        assert_eq!(updated.title, "Edited");
        assert_eq!(updated.text, "Hello");
    }

    #[tokio::test]
    async fn test_stale_version_is_not_found() {
        let storage = Storage::in_memory();
        let author = author(&storage).await;
        let post = PostService::create_post(&storage, &author, create_request())
            .await
            .unwrap();

        let err = PostService::update_post(
            &storage,
            post,
            UpdatePostRequest {
                text: Some("late".to_string()),
                version: Some(7),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(storage.posts.get_by_id(1).await.unwrap().version, 1);
    }
}
