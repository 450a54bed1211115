use std::time::Duration;

use chrono::Duration as Ttl;
use scribe_db::{Storage, StoreError};
use scribe_models::{NewComment, NewPost, NewUser, system_roles};
use sqlx::PgPool;
use uuid::Uuid;

fn storage(pool: &PgPool) -> Storage {
    Storage::postgres(pool.clone(), Duration::from_secs(5))
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role: system_roles::USER.to_string(),
        is_active: false,
    }
}

fn new_post(user_id: Uuid) -> NewPost {
    NewPost {
        title: "Hello".to_string(),
        text: "First post".to_string(),
        user_id,
        tags: vec!["rust".to_string()],
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn is_active(pool: &PgPool, id: Uuid) -> bool {
    sqlx::query_scalar::<_, bool>("SELECT is_active FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_seeded_role_levels(pool: PgPool) {
    let storage = storage(&pool);

    let user = storage.roles.get_by_name("user").await.unwrap();
    let admin = storage.roles.get_by_name("admin").await.unwrap();

    assert!(admin.level > user.level);
    assert!(matches!(
        storage.roles.get_by_name("overlord").await,
        Err(StoreError::NotFound)
    ));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_stale_version_update_is_not_found(pool: PgPool) {
    let storage = storage(&pool);
    let author = storage.users.create(new_user("alice", "alice@x.com")).await.unwrap();
    let mut post = storage.posts.create(new_post(author.id)).await.unwrap();
    assert_eq!(post.version, 1);

    let mut stale = post.clone();

    post.title = "Edited".to_string();
    storage.posts.update(&mut post).await.unwrap();
    assert_eq!(post.version, 2);

    stale.title = "Lost write".to_string();
    assert!(matches!(
        storage.posts.update(&mut stale).await,
        Err(StoreError::NotFound)
    ));

    let stored = storage.posts.get_by_id(post.id).await.unwrap();
    assert_eq!(stored.title, "Edited");
    assert_eq!(stored.version, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_of_missing_post_is_not_found(pool: PgPool) {
    let storage = storage(&pool);
    let author = storage.users.create(new_user("alice", "alice@x.com")).await.unwrap();
    let mut post = storage.posts.create(new_post(author.id)).await.unwrap();
    storage.posts.delete(post.id).await.unwrap();

    assert!(matches!(
        storage.posts.update(&mut post).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        storage.posts.delete(post.id).await,
        Err(StoreError::NotFound)
    ));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_racing_updates_have_one_winner(pool: PgPool) {
    let storage = storage(&pool);
    let author = storage.users.create(new_user("alice", "alice@x.com")).await.unwrap();
    let post = storage.posts.create(new_post(author.id)).await.unwrap();

    let mut first = post.clone();
    first.title = "First".to_string();
    let mut second = post.clone();
    second.title = "Second".to_string();

    let (a, b) = tokio::join!(
        storage.posts.update(&mut first),
        storage.posts.update(&mut second)
    );

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(StoreError::NotFound)))
    );

    let stored = storage.posts.get_by_id(post.id).await.unwrap();
    assert_eq!(stored.version, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_registration_writes_nothing(pool: PgPool) {
    let storage = storage(&pool);
    let ttl = Ttl::days(3);
    storage
        .users
        .create_and_invite(new_user("alice", "alice@x.com"), "t1", ttl)
        .await
        .unwrap();

    let dup_name = storage
        .users
        .create_and_invite(new_user("alice", "other@x.com"), "t2", ttl)
        .await;
    assert!(matches!(dup_name, Err(StoreError::DuplicateUsername)));

    let dup_email = storage
        .users
        .create_and_invite(new_user("bob", "alice@x.com"), "t3", ttl)
        .await;
    assert!(matches!(dup_email, Err(StoreError::DuplicateEmail)));

    assert_eq!(count(&pool, "users").await, 1);
    assert_eq!(count(&pool, "user_invitations").await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_username_clash_wins_over_email_clash(pool: PgPool) {
    let storage = storage(&pool);
    storage.users.create(new_user("alice", "a@x.com")).await.unwrap();
    storage.users.create(new_user("bob", "b@x.com")).await.unwrap();

    let result = storage
        .users
        .create_and_invite(new_user("alice", "b@x.com"), "t", Ttl::days(3))
        .await;

    assert!(matches!(result, Err(StoreError::DuplicateUsername)));
    assert_eq!(count(&pool, "user_invitations").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_expired_invitation_changes_nothing(pool: PgPool) {
    let storage = storage(&pool);
    let user = storage
        .users
        .create_and_invite(new_user("alice", "alice@x.com"), "token", Ttl::seconds(-60))
        .await
        .unwrap();

    assert!(matches!(
        storage.users.activate("token").await,
        Err(StoreError::NotFound)
    ));
    assert!(!is_active(&pool, user.id).await);
    assert_eq!(count(&pool, "user_invitations").await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_activation_redeems_invitation(pool: PgPool) {
    let storage = storage(&pool);
    let user = storage
        .users
        .create_and_invite(new_user("alice", "alice@x.com"), "token", Ttl::days(3))
        .await
        .unwrap();
    assert!(matches!(
        storage.users.get_by_username("alice").await,
        Err(StoreError::NotFound)
    ));

    storage.users.activate("token").await.unwrap();

    assert!(is_active(&pool, user.id).await);
    assert_eq!(count(&pool, "user_invitations").await, 0);
    assert_eq!(storage.users.get_by_username("alice").await.unwrap().id, user.id);
    assert!(matches!(
        storage.users.activate("token").await,
        Err(StoreError::NotFound)
    ));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_invitation_token_stored_hashed(pool: PgPool) {
    let storage = storage(&pool);
    storage
        .users
        .create_and_invite(new_user("alice", "alice@x.com"), "plain-token", Ttl::days(3))
        .await
        .unwrap();

    let stored: String = sqlx::query_scalar("SELECT token FROM user_invitations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "plain-token");
    assert_eq!(stored.len(), 64);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_username_includes_inactive(pool: PgPool) {
    let storage = storage(&pool);
    let user = storage.users.create(new_user("pending", "p@x.com")).await.unwrap();

    let found = storage.users.find_by_username("pending").await.unwrap();
    assert_eq!(found.id, user.id);
    assert!(!found.is_active);

    let promoted = storage.users.set_role(user.id, "moderator").await.unwrap();
    assert_eq!(promoted.role.name, "moderator");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_comment_on_missing_post_is_not_found(pool: PgPool) {
    let storage = storage(&pool);
    let author = storage.users.create(new_user("alice", "alice@x.com")).await.unwrap();

    let result = storage
        .comments
        .create(NewComment {
            post_id: 999,
            user_id: author.id,
            content: "hello?".to_string(),
        })
        .await;

    assert!(matches!(result, Err(StoreError::NotFound)));
    assert_eq!(count(&pool, "comments").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_deleting_post_removes_comments(pool: PgPool) {
    let storage = storage(&pool);
    let author = storage.users.create(new_user("alice", "alice@x.com")).await.unwrap();
    let post = storage.posts.create(new_post(author.id)).await.unwrap();

    let comment = storage
        .comments
        .create(NewComment {
            post_id: post.id,
            user_id: author.id,
            content: "first".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(comment.post_id, post.id);
    assert_eq!(storage.comments.list_by_post(post.id).await.unwrap().len(), 1);

    storage.posts.delete(post.id).await.unwrap();
    assert_eq!(count(&pool, "comments").await, 0);
}
