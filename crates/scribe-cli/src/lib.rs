//! # Scribe CLI
//!
//! Administrative commands and database seeding for Scribe.
//!
//! Everything goes through [`scribe_db::Storage`], so the same code runs
//! against PostgreSQL in production and the in-memory store in tests.
//!
//! ## Usage
//!
//! ```ignore
//! use scribe_cli::seeder::{seed_all, SeedConfig};
//!
//! let summary = seed_all(&storage, SeedConfig::new(10)).await?;
//! ```

pub mod admin;
pub mod seeder;
