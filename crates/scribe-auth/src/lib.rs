//! # Scribe Auth
//!
//! Issues and validates the signed session tokens handed out at login.
//!
//! - [`claims`]: the token payload
//! - [`jwt`]: the [`Authenticator`] seam and its HS256 implementation
//! - [`error`]: token failures
//!
//! # Example
//!
//! ```ignore
//! use scribe_auth::{Authenticator, Claims, JwtAuthenticator};
//! use scribe_config::TokenConfig;
//!
//! let config = TokenConfig::from_env();
//! let authenticator = JwtAuthenticator::new(&config);
//!
//! let token = authenticator.generate_token(&Claims::new(user_id, &config))?;
//! let claims = authenticator.validate_token(&token)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod error;
pub mod jwt;

pub use claims::Claims;
pub use error::AuthError;
pub use jwt::{Authenticator, JwtAuthenticator};
