//! Invitation tokens.
//!
//! The plain token is handed to the registering user once; only its
//! SHA-256 hex digest is ever stored.

use sha2::{Digest, Sha256};
use uuid::Uuid;

pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

pub fn hash_token(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}
