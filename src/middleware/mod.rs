//! Authentication and authorization.
//!
//! - [`auth`]: bearer-token authentication and the [`AuthUser`](auth::AuthUser) extractor
//! - [`basic`]: HTTP Basic authentication for operational endpoints
//! - [`ownership`]: the owner-or-role gate and resource extractors built on it
//!
//! # Request flow
//!
//! 1. `require_auth` validates `Authorization: Bearer <token>`, loads the
//!    user and stores it in the request extensions
//! 2. A resource extractor such as [`AuthorizedPost`](ownership::AuthorizedPost)
//!    loads the target and runs the gate
//! 3. The handler performs the mutation

pub mod auth;
pub mod basic;
pub mod ownership;
