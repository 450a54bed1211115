use scribe_core::AppError;
use scribe_db::Storage;
use scribe_models::{UpdateUserRequest, User};
use scribe_observability::track_user_activated;
use tracing::instrument;
use uuid::Uuid;

pub struct UserService;

impl UserService {
    #[instrument(skip(storage))]
    pub async fn get_users(storage: &Storage) -> Result<Vec<User>, AppError> {
        Ok(storage.users.list().await?)
    }

    /// Applies the present fields to `user` and persists the result.
    #[instrument(skip(storage, user, dto), fields(user_id = %user.id))]
    pub async fn update_user(
        storage: &Storage,
        mut user: User,
        dto: UpdateUserRequest,
    ) -> Result<User, AppError> {
        user.apply(dto);
        Ok(storage.users.update(&user).await?)
    }

    #[instrument(skip(storage))]
    pub async fn delete_user(storage: &Storage, id: Uuid) -> Result<(), AppError> {
        storage.users.delete(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Redeems an invitation token. Unknown or expired tokens are a 404.
    #[instrument(skip(storage, token))]
    pub async fn activate_user(storage: &Storage, token: &str) -> Result<(), AppError> {
        storage.users.activate(token).await?;
        track_user_activated();
        Ok(())
    }
}
