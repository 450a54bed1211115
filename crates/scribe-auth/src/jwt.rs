//! HS256 session tokens.
//!
//! Validation checks the signature, `exp` and `nbf` with zero leeway. The
//! issuer and audience are written into every token but are not enforced on
//! the way back in.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use scribe_config::TokenConfig;

use crate::claims::Claims;
use crate::error::AuthError;

/// Issues and validates signed session tokens.
///
/// Implementations are stateless apart from their key material and are
/// shared across request tasks.
pub trait Authenticator: Send + Sync {
    fn generate_token(&self, claims: &Claims) -> Result<String, AuthError>;

    fn validate_token(&self, token: &str) -> Result<Claims, AuthError>;
}

#[derive(Clone)]
pub struct JwtAuthenticator {
    secret: String,
}

impl JwtAuthenticator {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);
        validation
    }
}

impl fmt::Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAuthenticator")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Authenticator for JwtAuthenticator {
    fn generate_token(&self, claims: &Claims) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(AuthError::Encoding)
    }

    fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims)
        .map_err(AuthError::InvalidToken)
    }
}
