use crate::{env_or, env_string};

/// Signing settings for session tokens.
///
/// An empty `secret` is allowed at load time; issuing a token with it fails.
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub secret: String,
    /// Lifetime in seconds.
    pub expiry: i64,
    pub issuer: String,
    pub audience: String,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env_string("TOKEN_SECRET", ""),
            expiry: env_or("TOKEN_EXPIRY_SECS", 3 * 24 * 60 * 60),
            issuer: env_string("TOKEN_ISSUER", "scribe"),
            audience: env_string("TOKEN_AUDIENCE", "scribe"),
        }
    }
}
