//! Bounded retry controller
//!
//! Runs a check sequentially until it succeeds or the attempt budget runs out.
//! The returned count is the number of attempts consumed on success and
//! `max_attempts + 1` on exhaustion, so callers detect failure with
//! `attempts > max_attempts`. That extra increment comes from bumping the
//! counter before the loop condition is re-checked; downstream comparisons
//! rely on it, so it stays.

use std::future::Future;
use std::time::Duration;

/// How many attempts to make and how long to pause after a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts = 1` means exactly one attempt and zero retries.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    /// Sleep between a failed attempt and the next one.
    ///
    /// Zero by default: the services-stable waiter already blocks for its
    /// own polling window.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Progress notifications for tracing. They never affect control flow.
#[derive(Debug)]
pub enum RetryEvent<'a, E> {
    /// About to run attempt `attempt` (1-based).
    Attempt { attempt: u32, max_attempts: u32 },
    /// Attempt `attempt` failed with `cause`.
    Failed { attempt: u32, cause: &'a E },
}

/// Run `check` up to `max_attempts` times and return the attempt count.
pub async fn retry<E, F, Fut>(max_attempts: u32, check: F) -> u32
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    retry_with_observer(&RetryPolicy::new(max_attempts), check, |_| {}).await
}

/// Like [`retry`], reporting each attempt and each failure to `observer`.
///
/// Failures are never told apart: every `Err` is counted and the loop moves on.
pub async fn retry_with_observer<E, F, Fut, O>(
    policy: &RetryPolicy,
    mut check: F,
    mut observer: O,
) -> u32
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    O: FnMut(RetryEvent<'_, E>),
{
    let mut attempt: u32 = 1;
    let mut stable = false;

    while attempt <= policy.max_attempts && !stable {
        observer(RetryEvent::Attempt {
            attempt,
            max_attempts: policy.max_attempts,
        });

        match check().await {
            Ok(()) => stable = true,
            Err(cause) => {
                observer(RetryEvent::Failed {
                    attempt,
                    cause: &cause,
                });
                attempt = attempt.saturating_add(1);
                if attempt <= policy.max_attempts && !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    attempt
}
