use anyhow::anyhow;
use scribe_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token signing secret is not configured")]
    MissingSecret,
    #[error("failed to sign token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("invalid subject claim: {0}")]
    InvalidSubject(String),
}

impl AuthError {
    /// True when the failure is the caller's fault rather than ours.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidToken(_) | Self::InvalidSubject(_))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if err.is_client_error() {
            AppError::unauthorized(anyhow!(err))
        } else {
            AppError::internal(anyhow!(err))
        }
    }
}
