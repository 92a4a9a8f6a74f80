//! Retry with exponential backoff for transient HTTP failures.
//!
//! Only network-level errors and 429 responses are retried; shape errors
//! (bad JSON, malformed documents) and definitive statuses (404) are
//! propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` represents a transient condition worth retrying
/// after a backoff delay.
///
/// Retriable: [`ScraperError::RateLimited`] (HTTP 429) and
/// [`ScraperError::Http`] (connection reset, timeout, TLS failure).
/// Everything else — [`ScraperError::NotFound`],
/// [`ScraperError::UnexpectedStatus`], [`ScraperError::Deserialize`],
/// [`ScraperError::MalformedProduct`], [`ScraperError::PaginationLimit`],
/// [`ScraperError::InvalidCatalogUrl`] — would fail identically on a retry.
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::RateLimited { .. } | ScraperError::Http(_)
    )
}

/// Executes `operation`, retrying transient errors with exponential backoff.
///
/// The wait before the n-th retry is `backoff_base_secs * 2^(n-1)` seconds;
/// with `max_retries = 3` the operation runs at most 4 times. Non-retriable
/// errors return immediately, and the last error is returned once retries
/// are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                err
            }
        };

        // Shift capped at 62 so the multiplication cannot overflow.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient fetch error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
