use scribe_core::AppError;
use scribe_db::Storage;
use scribe_models::{Comment, CreateCommentRequest, NewComment, User};
use tracing::instrument;

pub struct CommentService;

impl CommentService {
    /// Comments on `post_id` as `author`. A missing post is a 404.
    #[instrument(skip(storage, author, dto), fields(user_id = %author.id))]
    pub async fn create_comment(
        storage: &Storage,
        post_id: i64,
        author: &User,
        dto: CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        Ok(storage
            .comments
            .create(NewComment {
                post_id,
                user_id: author.id,
                content: dto.content,
            })
            .await?)
    }
}
