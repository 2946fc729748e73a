//! Retry policy for transient storage conflicts.

use std::future::Future;

use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;

use crate::error::AppError;

/// Delay before the single retry of a conflicting storage operation.
const RETRY_DELAY_MS: u64 = 20;

/// Runs `operation`, retrying it exactly once if it fails with
/// [`AppError::Conflict`].
///
/// Any other error, or a second conflict, is returned to the caller.
/// `operation` is called again from scratch on retry, so it may derive
/// fresh inputs (e.g. a new identifier) on each attempt.
pub async fn retry_once_on_conflict<T, F, Fut>(operation: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let strategy = FixedInterval::from_millis(RETRY_DELAY_MS).take(1);
    RetryIf::spawn(strategy, operation, AppError::is_retryable).await
}
