//! # Scribe Config
//!
//! Configuration types for the Scribe API, loaded once from environment
//! variables at startup and shared read-only afterwards.
//!
//! - [`server`]: listen address and request timeout
//! - [`database`]: connection pool limits and per-query timeout
//! - [`token`]: session token signing secret, expiry, issuer and audience
//! - [`basic_auth`]: credentials guarding the health check
//! - [`invitation`]: invitation token lifetime
//! - [`cors`]: allowed CORS origins
//!
//! # Example
//!
//! ```ignore
//! use scribe_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.addr);
//! ```

pub mod basic_auth;
pub mod cors;
pub mod database;
pub mod invitation;
pub mod server;
pub mod token;

use std::env;
use std::str::FromStr;

pub use basic_auth::BasicAuthConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use invitation::InvitationConfig;
pub use server::ServerConfig;
pub use token::TokenConfig;

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub basic_auth: BasicAuthConfig,
    pub invitation: InvitationConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            token: TokenConfig::from_env(),
            basic_auth: BasicAuthConfig::from_env(),
            invitation: InvitationConfig::from_env(),
            cors: CorsConfig::from_env(),
        }
    }
}

/// Reads and parses `key`, falling back to `default` when unset or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        assert_eq!(env_or("SCRIBE_TEST_UNSET_VALUE", 42u32), 42);
    }

    #[test]
    fn test_env_or_falls_back_when_unparsable() {
        // SAFETY: the key is unique to this test.
        unsafe { env::set_var("SCRIBE_TEST_BAD_NUMBER", "forty-two") };
        assert_eq!(env_or("SCRIBE_TEST_BAD_NUMBER", 7u64), 7);
    }

    #[test]
    fn test_env_or_parses_value() {
        // SAFETY: the key is unique to this test.
        unsafe { env::set_var("SCRIBE_TEST_GOOD_NUMBER", "15") };
        assert_eq!(env_or("SCRIBE_TEST_GOOD_NUMBER", 5i64), 15);
    }

    #[test]
    fn test_invitation_default_is_three_days() {
        assert_eq!(InvitationConfig::default().expiry, 259_200);
    }
}
