//! Running slow collaborator calls off the caller's thread.

use crate::error::UsageError;

/// Submits blocking work to the runtime's blocking pool.
///
/// The returned future completes exactly once with the work's result. A
/// panic inside `work` is reported as [`UsageError::Background`].
pub async fn run_off_thread<F, T>(work: F) -> Result<T, UsageError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| UsageError::Background(err.to_string()))
}
