//! Account administration.
//!
//! Admins cannot be created through the API: registration always assigns
//! the `user` role, so the first admin comes from here.

use anyhow::{Context, anyhow, bail};
use scribe_core::hash_password;
use scribe_db::{Storage, StoreError};
use scribe_models::{NewUser, User, system_roles};

/// Creates an already-active user holding the `admin` role.
pub async fn create_admin(
    storage: &Storage,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<User> {
    let length = password.chars().count();
    if !(5..=50).contains(&length) {
        bail!("password must be between 5 and 50 characters");
    }

    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let user = storage
        .users
        .create(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role: system_roles::ADMIN.to_string(),
            is_active: true,
        })
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail | StoreError::DuplicateUsername => anyhow!("{e}"),
            other => anyhow!(other).context("failed to create admin"),
        })?;

    Ok(user)
}

/// Assigns `role` to the user called `username`.
pub async fn set_role(storage: &Storage, username: &str, role: &str) -> anyhow::Result<User> {
    storage
        .roles
        .get_by_name(role)
        .await
        .with_context(|| format!("unknown role '{role}'"))?;

    let user = storage
        .users
        .find_by_username(username)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => anyhow!("no user named '{username}'"),
            other => anyhow!(other),
        })?;

    Ok(storage.users.set_role(user.id, role).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_admin_is_active_admin() {
        let storage = Storage::in_memory();

        let admin = create_admin(&storage, "root", "root@x.com", "secret1")
            .await
            .unwrap();

        assert!(admin.is_active);
        assert_eq!(admin.role.name, "admin");
        assert_eq!(admin.role.level, 3);
        let found = storage.users.get_by_username("root").await.unwrap();
        assert_eq!(found.id, admin.id);
    }

    #[tokio::test]
    async fn test_create_admin_rejects_duplicates() {
        let storage = Storage::in_memory();
        create_admin(&storage, "root", "root@x.com", "secret1")
            .await
            .unwrap();

        let err = create_admin(&storage, "root", "other@x.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "a user with this username already exists");
    }

    #[tokio::test]
    async fn test_create_admin_rejects_short_password() {
        let storage = Storage::in_memory();
        assert!(
            create_admin(&storage, "root", "root@x.com", "abc")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_create_admin_counts_password_characters() {
        let storage = Storage::in_memory();

        // Four characters, eight bytes.
        assert!(
            create_admin(&storage, "root", "root@x.com", "éééé")
                .await
                .is_err()
        );
        // 26 characters, 52 bytes.
        let long = "é".repeat(26);
        let admin = create_admin(&storage, "root", "root@x.com", &long)
            .await
            .unwrap();
        assert_eq!(admin.username, "root");
    }

    #[tokio::test]
    async fn test_set_role_on_inactive_user() {
        let storage = Storage::in_memory();
        let pending = storage
            .users
            .create(NewUser {
                username: "pending".to_string(),
                email: "pending@x.com".to_string(),
                password_hash: "hash".to_string(),
                role: system_roles::USER.to_string(),
                is_active: false,
            })
            .await
            .unwrap();

        let promoted = set_role(&storage, "pending", "moderator").await.unwrap();
        assert_eq!(promoted.id, pending.id);
        assert_eq!(promoted.role.name, "moderator");
        assert!(!promoted.is_active);
    }

    #[tokio::test]
    async fn test_set_role() {
        let storage = Storage::in_memory();
        create_admin(&storage, "root", "root@x.com", "secret1")
            .await
            .unwrap();

        let demoted = set_role(&storage, "root", "moderator").await.unwrap();
        assert_eq!(demoted.role.name, "moderator");

        assert!(set_role(&storage, "root", "overlord").await.is_err());
        assert!(set_role(&storage, "nobody", "user").await.is_err());
    }
}
