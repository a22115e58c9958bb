//! Fixed-wait retry for provider calls.
//!
//! The provider's rate limits make exponential growth pointless here: the
//! original operating policy is "try again after a fixed wait, a bounded
//! number of times". Non-transient errors are surfaced immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::MarketsError;

/// Returns `true` for errors worth another attempt after the wait.
///
/// **Retriable:** network-level failures (timeout, connection reset),
/// HTTP 5xx, and HTTP 429.
///
/// **Not retriable:** application-level provider errors and malformed
/// responses — repeating the request returns the same answer.
pub(crate) fn is_retriable(err: &MarketsError) -> bool {
    match err {
        MarketsError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status()
                    .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
        }
        MarketsError::ApiError(_) | MarketsError::Deserialize { .. } => false,
    }
}

/// Runs `operation` up to `max_attempts` times, sleeping `wait` between
/// attempts on transient errors.
///
/// With `max_attempts = 5`, a call that fails transiently four times and
/// succeeds on the fifth incurs exactly four waits. Non-retriable errors
/// and exhaustion both return the last error.
pub(crate) async fn retry_fixed<T, F, Fut>(
    max_attempts: u32,
    wait: Duration,
    mut operation: F,
) -> Result<T, MarketsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MarketsError>>,
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_attempts.max(1) {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    wait_secs = wait.as_secs(),
                    error = %err,
                    "transient provider error — retrying after fixed wait"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn deserialize_err() -> MarketsError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        MarketsError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    #[test]
    fn api_error_is_not_retriable() {
        assert!(!is_retriable(&MarketsError::ApiError("bad".to_owned())));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed(5, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, MarketsError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn three_transient_failures_then_success_on_fourth() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed(5, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt <= 3 {
                    let e = reqwest::Client::builder()
                        .timeout(Duration::from_millis(1))
                        .build()
                        .unwrap()
                        .get("http://0.0.0.0:1")
                        .send()
                        .await
                        .unwrap_err();
                    Err::<u32, _>(MarketsError::Http(e))
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 4, "succeeds on the 4th attempt");
    }

    #[tokio::test]
    async fn does_not_retry_api_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed(5, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(MarketsError::ApiError("nope".to_owned()))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(MarketsError::ApiError(_))));
    }

    #[tokio::test]
    async fn exhaustion_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_fixed(3, Duration::ZERO, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                let e = reqwest::Client::builder()
                    .timeout(Duration::from_millis(1))
                    .build()
                    .unwrap()
                    .get("http://0.0.0.0:1")
                    .send()
                    .await
                    .unwrap_err();
                Err::<u32, _>(MarketsError::Http(e))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "max_attempts bounds total tries");
        assert!(matches!(result, Err(MarketsError::Http(_))));
    }
}
