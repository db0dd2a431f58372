//! In-memory stand-ins for the AWS collaborators.

use crate::aws::{AwsError, AwsResult, ConnectionFactory, CredentialProvider, StabilityCheck};
use crate::error::StabilityCheckFailure;
use crate::types::Credentials;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckCall {
    pub cluster: String,
    pub services: Vec<String>,
    pub max_wait: Duration,
}

#[derive(Default)]
pub(crate) struct FakeCredentialProvider {
    pub fail: bool,
    pub calls: AtomicU32,
}

impl FakeCredentialProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CredentialProvider for FakeCredentialProvider {
    async fn assume_role(
        &self,
        role_arn: &str,
        _session_name: &str,
        _duration_seconds: i32,
    ) -> AwsResult<Credentials> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AwsError::Sts(format!("AccessDenied for {role_arn}")));
        }
        Ok(Credentials {
            access_key_id: "AKIDFAKE".into(),
            secret_access_key: "fake-secret".into(),
            session_token: "fake-token".into(),
            region: "us-east-1".into(),
        })
    }
}

/// Hands out connections whose checks fail `failures` times, then succeed.
pub(crate) struct FakeConnectionFactory {
    failures: u32,
    pub connections_made: AtomicU32,
    pub calls: Arc<Mutex<Vec<CheckCall>>>,
}

impl FakeConnectionFactory {
    pub fn failing_times(failures: u32) -> Self {
        Self {
            failures,
            connections_made: AtomicU32::new(0),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn never_stable() -> Self {
        Self::failing_times(u32::MAX)
    }

    pub fn recorded_calls(&self) -> Vec<CheckCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl ConnectionFactory for FakeConnectionFactory {
    type Connection = FakeConnection;

    fn make_connection(&self, _credentials: &Credentials) -> FakeConnection {
        self.connections_made.fetch_add(1, Ordering::SeqCst);
        FakeConnection {
            failures: self.failures,
            calls: Arc::clone(&self.calls),
        }
    }
}

pub(crate) struct FakeConnection {
    failures: u32,
    calls: Arc<Mutex<Vec<CheckCall>>>,
}

#[async_trait]
impl StabilityCheck for FakeConnection {
    async fn check_stability(
        &self,
        cluster: &str,
        services: &[String],
        max_wait: Duration,
    ) -> Result<(), StabilityCheckFailure> {
        let attempt = {
            let mut calls = self.calls.lock().expect("lock poisoned");
            calls.push(CheckCall {
                cluster: cluster.to_string(),
                services: services.to_vec(),
                max_wait,
            });
            u32::try_from(calls.len()).unwrap_or(u32::MAX)
        };
        if attempt <= self.failures {
            Err(StabilityCheckFailure::TimedOut(max_wait))
        } else {
            Ok(())
        }
    }
}
