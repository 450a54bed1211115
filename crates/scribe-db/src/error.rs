use anyhow::anyhow;
use scribe_core::AppError;
use thiserror::Error;

pub const DUPLICATE_EMAIL: &str = "a user with this email already exists";
pub const DUPLICATE_USERNAME: &str = "a user with this username already exists";

const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_USERNAME_KEY: &str = "users_username_key";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing row, or a versioned update whose expected version is stale.
    #[error("record not found")]
    NotFound,
    #[error("{}", DUPLICATE_EMAIL)]
    DuplicateEmail,
    #[error("{}", DUPLICATE_USERNAME)]
    DuplicateUsername,
    #[error("storage call timed out")]
    Timeout,
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return StoreError::NotFound;
        }

        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                match db.constraint() {
                    Some(USERS_EMAIL_KEY) => return StoreError::DuplicateEmail,
                    Some(USERS_USERNAME_KEY) => return StoreError::DuplicateUsername,
                    _ => {}
                }
            }
        }

        StoreError::Database(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::not_found(anyhow!(err)),
            StoreError::DuplicateEmail | StoreError::DuplicateUsername => {
                AppError::conflict(anyhow!(err))
            }
            StoreError::Timeout | StoreError::Database(_) => AppError::internal(anyhow!(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn test_duplicate_messages_reach_client() {
        let err: AppError = StoreError::DuplicateUsername.into();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.client_message(), DUPLICATE_USERNAME);

        let err: AppError = StoreError::DuplicateEmail.into();
        assert_eq!(err.client_message(), DUPLICATE_EMAIL);
    }

    #[test]
    fn test_not_found_and_timeout_statuses() {
        let err: AppError = StoreError::NotFound.into();
        assert_eq!(err.status.as_u16(), 404);

        let err: AppError = StoreError::Timeout.into();
        assert_eq!(err.status.as_u16(), 500);
        assert_eq!(err.client_message(), "the server encountered a problem");
    }
}
