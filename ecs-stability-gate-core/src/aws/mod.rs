//! AWS SDK integration: role assumption, ECS connection, services-stable waiter.

pub(crate) mod ecs_client;
pub(crate) mod sts;

use crate::error::StabilityCheckFailure;
use crate::types::Credentials;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("STS error: {0}")]
    Sts(String),
    #[error("AssumeRole response for '{0}' carried no credentials")]
    MissingCredentials(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// Obtains short-lived credentials for a role.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        duration_seconds: i32,
    ) -> AwsResult<Credentials>;
}

/// Builds a connection from credentials. Must not perform I/O.
pub trait ConnectionFactory: Send + Sync {
    type Connection: StabilityCheck;

    fn make_connection(&self, credentials: &Credentials) -> Self::Connection;
}

/// One blocking "wait until stable" call. Never retries on its own.
#[async_trait]
pub trait StabilityCheck: Send + Sync {
    async fn check_stability(
        &self,
        cluster: &str,
        services: &[String],
        max_wait: Duration,
    ) -> Result<(), StabilityCheckFailure>;
}
