//! Per-call deadlines for store round trips.

use std::future::Future;
use std::time::Duration;

use crate::error::{RepoError, RepoResult};

/// Drive `fut` to completion or give up after `limit`.
///
/// On expiry the future is dropped, which cancels the in-flight statement
/// on its connection, and [`RepoError::Timeout`] is returned.
pub async fn with_deadline<T, F>(limit: Duration, fut: F) -> RepoResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            tracing::debug!(?limit, "Database call timed out");
            Err(RepoError::Timeout(limit))
        }
    }
}
