use scribe_core::AppError;
use scribe_db::Storage;
use scribe_models::{Post, PostWithComments};
use tracing::instrument;

pub struct FeedService;

impl FeedService {
    #[instrument(skip(storage))]
    pub async fn get_feed(storage: &Storage) -> Result<Vec<Post>, AppError> {
        Ok(storage.posts.list().await?)
    }

    #[instrument(skip(storage))]
    pub async fn get_post(storage: &Storage, id: i64) -> Result<PostWithComments, AppError> {
        let post = storage.posts.get_by_id(id).await?;
        let comments = storage.comments.list_by_post(id).await?;
        Ok(PostWithComments { post, comments })
    }
}
