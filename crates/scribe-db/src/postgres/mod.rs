//! PostgreSQL implementation of the storage traits.
//!
//! Queries use the runtime-checked `sqlx::query*` functions. Every call is
//! wrapped in [`timed`], so a slow database surfaces as
//! [`StoreError::Timeout`] instead of a hung request.

mod comments;
mod posts;
mod roles;
mod users;

use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

pub use comments::PgCommentStore;
pub use posts::PgPostStore;
pub use roles::PgRoleStore;
pub use users::PgUserStore;

/// Runs `fut`, failing with [`StoreError::Timeout`] once `limit` elapses.
///
/// Dropping the inner future on timeout drops any transaction it held,
/// which rolls it back.
pub(crate) async fn timed<T, F>(limit: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "storage call timed out");
            Err(StoreError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timed_passes_through_result() {
        let result = timed(Duration::from_secs(1), async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_timed_times_out() {
        let result = timed(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StoreError>(())
        })
        .await;

        assert!(matches!(result, Err(StoreError::Timeout)));
    }
}
