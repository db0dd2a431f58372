//! Error types for the stability gate.

use crate::aws::AwsError;
use std::time::Duration;
use thiserror::Error;

/// Why a single stability check attempt failed.
///
/// The retry controller treats every variant the same way; the tag only
/// exists so attempt tracing can say what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StabilityCheckFailure {
    /// The waiter gave up before the services settled.
    #[error("services did not become stable within {0:?}")]
    TimedOut(Duration),

    /// The waiter hit a terminal state, e.g. a service that is missing or inactive.
    #[error("services reached a failure state: {0}")]
    FailureState(String),

    /// The DescribeServices call itself failed.
    #[error("stability check request failed: {0}")]
    Request(String),
}

/// Errors that end a gate run.
#[derive(Debug, Error)]
pub enum GateError {
    /// A required input is missing or malformed. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Role assumption failed. Never retried.
    #[error("Failed to assume role: {0}")]
    Credential(#[source] AwsError),

    /// Every permitted attempt failed.
    #[error("Service is not stable after {retries} retries!")]
    Exhausted { retries: u32 },

    /// Anything else, surfaced with its message.
    #[error("{0}")]
    Unknown(String),
}

impl GateError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}

pub type GateResult<T> = Result<T, GateError>;
