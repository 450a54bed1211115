//! Fake posts and comments.

use std::time::Instant;

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence, Words};
use rayon::prelude::*;
use scribe_db::Storage;
use scribe_models::{NewComment, NewPost};
use uuid::Uuid;

const TITLE_MAX: usize = 100;
const TEXT_MAX: usize = 1000;

fn truncate(s: String, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Generates `per_user` posts for each author.
pub fn generate_posts(authors: &[Uuid], per_user: usize) -> Vec<NewPost> {
    authors
        .par_iter()
        .flat_map(|&user_id| {
            (0..per_user)
                .map(|_| {
                    let title: String = Sentence(2..6).fake();
                    let text: String = Paragraph(1..4).fake();
                    let tags: Vec<String> = Words(1..4).fake();

                    NewPost {
                        title: truncate(title, TITLE_MAX),
                        text: truncate(text, TEXT_MAX),
                        user_id,
                        tags,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Generates `per_post` comments on every post, authors picked round-robin.
pub fn generate_comments(post_ids: &[i64], authors: &[Uuid], per_post: usize) -> Vec<NewComment> {
    if authors.is_empty() {
        return Vec::new();
    }

    post_ids
        .par_iter()
        .enumerate()
        .flat_map(|(post_idx, &post_id)| {
            (0..per_post)
                .map(|comment_idx| {
                    let content: String = Sentence(3..12).fake();
                    NewComment {
                        post_id,
                        user_id: authors[(post_idx + comment_idx) % authors.len()],
                        content: truncate(content, TEXT_MAX),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_posts(
    storage: &Storage,
    authors: &[Uuid],
    per_user: usize,
) -> anyhow::Result<Vec<i64>> {
    let start_time = Instant::now();
    println!("📝 Seeding {} posts...", authors.len() * per_user);

    let mut ids = Vec::with_capacity(authors.len() * per_user);
    for post in generate_posts(authors, per_user) {
        ids.push(storage.posts.create(post).await?.id);
    }

    println!("   ✓ Inserted {} posts in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

pub async fn seed_comments(
    storage: &Storage,
    post_ids: &[i64],
    authors: &[Uuid],
    per_post: usize,
) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    let comments = generate_comments(post_ids, authors, per_post);
    println!("💬 Seeding {} comments...", comments.len());

    let count = comments.len();
    for comment in comments {
        storage.comments.create(comment).await?;
    }

    println!("   ✓ Inserted {count} comments in {:?}", start_time.elapsed());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_posts_fit_limits() {
        let authors = vec![Uuid::new_v4(), Uuid::new_v4()];
        let posts = generate_posts(&authors, 5);

        assert_eq!(posts.len(), 10);
        for post in &posts {
            assert!(!post.title.is_empty() && post.title.chars().count() <= TITLE_MAX);
            assert!(!post.text.is_empty() && post.text.chars().count() <= TEXT_MAX);
            assert!(!post.tags.is_empty());
        }
    }

    #[test]
    fn test_comments_without_authors() {
        assert!(generate_comments(&[1, 2], &[], 3).is_empty());
    }
}
