//! Fake user accounts.

use std::time::Instant;

use fake::Fake;
use fake::faker::internet::en::Username;
use rayon::prelude::*;
use scribe_db::Storage;
use scribe_models::{NewUser, system_roles};
use uuid::Uuid;

/// Generates `count` active users sharing `password_hash`.
///
/// Usernames get an index suffix so a single run never collides with itself.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let base: String = Username().fake();
            let username = format!("{}{}", base.to_lowercase(), idx);

            NewUser {
                email: format!("{username}@example.com"),
                username,
                password_hash: password_hash.to_string(),
                role: system_roles::USER.to_string(),
                is_active: true,
            }
        })
        .collect()
}

pub async fn seed_users(
    storage: &Storage,
    count: usize,
    password_hash: &str,
) -> anyhow::Result<Vec<Uuid>> {
    let start_time = Instant::now();
    println!("👥 Seeding {count} users...");

    let mut ids = Vec::with_capacity(count);
    for user in generate_users(count, password_hash) {
        ids.push(storage.users.create(user).await?.id);
    }

    println!("   ✓ Inserted {} users in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}
