use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Credentials exchanged for a session token.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100, message = "username is required and must be at most 100 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 50, message = "password must be between 5 and 50 characters"))]
    pub password: String,
}
