//! # Scribe Core
//!
//! Core types, errors, and utilities for the Scribe API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`response`]: The `{"data": ...}` success envelope
//!
//! # Example
//!
//! ```ignore
//! use scribe_core::{AppError, DataResponse, hash_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("post 42 not found"));
//! let hash = hash_password("secure_password")?;
//! let body = DataResponse::new("token");
//! ```

pub mod errors;
pub mod password;
pub mod response;

pub use errors::{AppError, ErrorDetail};
pub use password::{hash_password, verify_password};
pub use response::DataResponse;
