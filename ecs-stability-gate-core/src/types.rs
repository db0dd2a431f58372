//! Plain data carried through a gate run.

use crate::error::GateError;
use std::fmt;
use std::time::Duration;

/// Resolved inputs for one run. Built once by [`crate::GateInputs::resolve`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationParams {
    pub region: String,
    pub cluster: String,
    /// Service names in the order they were given.
    pub services: Vec<String>,
    /// Maximum number of stability check attempts (not retries after a first try).
    pub max_retries: u32,
    pub verbose: bool,
    pub role_to_assume: String,
    pub role_session_name: String,
    pub role_duration_seconds: i32,
    /// How long one stability check may block.
    pub wait_timeout: Duration,
    /// Pause between a failed attempt and the next one.
    pub retry_delay: Duration,
}

/// Short-lived credentials returned by role assumption.
///
/// Held in memory only. `Debug` redacts everything but the region.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub region: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

/// Terminal result of a gate run.
#[derive(Debug)]
pub enum Outcome {
    /// Services were stable within budget.
    Stable { attempts: u32 },
    /// All attempts failed. `attempts` is `max_retries + 1` here.
    Unstable { attempts: u32, max_retries: u32 },
    /// The run failed before or outside the retry loop.
    ProviderError(GateError),
}

impl Outcome {
    /// Classify the count returned by the retry controller.
    ///
    /// A count above `max_retries` is the exhaustion signal: the controller
    /// increments past the limit before its loop condition fails.
    pub fn from_attempts(max_retries: u32, attempts: u32) -> Self {
        if attempts > max_retries {
            Self::Unstable {
                attempts,
                max_retries,
            }
        } else {
            Self::Stable { attempts }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Stable { .. })
    }

    /// Value of the `retries` output, set only on success.
    pub fn retries_output(&self) -> Option<String> {
        match self {
            Self::Stable { attempts } => Some(attempts.to_string()),
            _ => None,
        }
    }

    /// Human-readable reason for a failed run.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Stable { .. } => None,
            Self::Unstable { max_retries, .. } => Some(
                GateError::Exhausted {
                    retries: *max_retries,
                }
                .to_string(),
            ),
            Self::ProviderError(err) => Some(err.to_string()),
        }
    }
}

impl From<GateError> for Outcome {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Exhausted { retries } => Self::Unstable {
                attempts: retries.saturating_add(1),
                max_retries: retries,
            },
            other => Self::ProviderError(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attempts_within_budget_is_stable() {
        let outcome = Outcome::from_attempts(3, 3);
        assert!(outcome.is_success());
        assert_eq!(outcome.retries_output().as_deref(), Some("3"));
        assert!(outcome.failure_message().is_none());
    }

    #[test]
    fn test_from_attempts_past_budget_is_unstable() {
        let outcome = Outcome::from_attempts(2, 3);
        assert!(!outcome.is_success());
        assert!(outcome.retries_output().is_none());
        assert_eq!(
            outcome.failure_message().as_deref(),
            Some("Service is not stable after 2 retries!")
        );
    }

    #[test]
    fn test_exhausted_error_converts_to_unstable() {
        let outcome = Outcome::from(GateError::Exhausted { retries: 4 });
        assert!(matches!(
            outcome,
            Outcome::Unstable {
                attempts: 5,
                max_retries: 4
            }
        ));
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials {
            access_key_id: "AKIAEXAMPLE".into(),
            secret_access_key: "very-secret".into(),
            session_token: "token-value".into(),
            region: "eu-west-1".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("AKIAEXAMPLE"));
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("token-value"));
        assert!(rendered.contains("eu-west-1"));
    }
}
