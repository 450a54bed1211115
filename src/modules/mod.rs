//! Feature modules.
//!
//! Each module is split into `controller.rs` (HTTP handlers with OpenAPI
//! annotations), `service.rs` (logic over [`Storage`](scribe_db::Storage))
//! and `router.rs` (route table).

pub mod auth;
pub mod comments;
pub mod feed;
pub mod health;
pub mod posts;
pub mod users;
