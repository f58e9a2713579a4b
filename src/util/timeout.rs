//! Timeout helper for host-imposed deadlines.

use std::future::Future;
use std::time::Duration;

use crate::error::RocError;

/// Wrap a future with a timeout. The inner future is dropped when the
/// deadline passes, which also abandons a pending confirmation prompt.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, RocError>>,
) -> Result<T, RocError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(RocError::Timeout(duration.as_millis() as u64)),
    }
}
