//! Database seeding for local development.
//!
//! Generation is pure and runs on the rayon pool; insertion goes through
//! [`Storage`] one row at a time so every row passes the same constraints
//! the API enforces.

pub mod posts;
pub mod users;

use std::time::Instant;

use scribe_core::hash_password;
use scribe_db::Storage;

/// Password given to every seeded account.
pub const SEED_PASSWORD: &str = "password";

/// How much fake data to create.
#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub users: usize,
    pub posts_per_user: usize,
    pub comments_per_post: usize,
}

impl SeedConfig {
    /// `users` accounts with three posts each and two comments per post.
    pub fn new(users: usize) -> Self {
        Self {
            users,
            posts_per_user: 3,
            comments_per_post: 2,
        }
    }

    pub fn with_posts_per_user(mut self, posts: usize) -> Self {
        self.posts_per_user = posts;
        self
    }

    pub fn with_comments_per_post(mut self, comments: usize) -> Self {
        self.comments_per_post = comments;
        self
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

/// Seeds active users, their posts and comments on those posts.
pub async fn seed_all(storage: &Storage, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Starting database seeding...");

    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| e.error)?;

    let user_ids = users::seed_users(storage, config.users, &password_hash).await?;
    let post_ids = posts::seed_posts(storage, &user_ids, config.posts_per_user).await?;
    let comments =
        posts::seed_comments(storage, &post_ids, &user_ids, config.comments_per_post).await?;

    let summary = SeedSummary {
        users: user_ids.len(),
        posts: post_ids.len(),
        comments,
    };

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!(
        "   {} users, {} posts, {} comments (password: {SEED_PASSWORD})",
        summary.users, summary.posts, summary.comments
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_all_counts() {
        let storage = Storage::in_memory();
        let config = SeedConfig::new(4)
            .with_posts_per_user(2)
            .with_comments_per_post(3);

        let summary = seed_all(&storage, config).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                users: 4,
                posts: 8,
                comments: 24
            }
        );
        assert_eq!(storage.users.list().await.unwrap().len(), 4);
        assert_eq!(storage.posts.list().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_seeded_users_can_log_in() {
        let storage = Storage::in_memory();
        seed_all(&storage, SeedConfig::new(1)).await.unwrap();

        let seeded = &storage.users.list().await.unwrap()[0];
        let user = storage
            .users
            .get_by_username(&seeded.username)
            .await
            .unwrap();
        assert!(scribe_core::verify_password(SEED_PASSWORD, &user.password_hash).unwrap());
    }
}
