//! Stability wait logic for the stability gate service

use crate::aws::{ConnectionFactory, CredentialProvider, StabilityCheck};
use crate::error::{GateError, GateResult};
use crate::retry::{retry_with_observer, RetryEvent, RetryPolicy};
use crate::types::{InvocationParams, Outcome};
use log::{debug, info};

impl<P, F> super::service::StabilityGateService<P, F>
where
    P: CredentialProvider,
    F: ConnectionFactory,
{
    /// Assume the role, connect, and run the bounded stability check.
    ///
    /// Returns `Outcome::Stable` or `Outcome::Unstable`; credential failures
    /// propagate as errors and are never retried.
    pub async fn wait_for_stability(&self, params: &InvocationParams) -> GateResult<Outcome> {
        info!(
            "Assuming role {} in {}",
            params.role_to_assume, params.region
        );
        let credentials = self
            .credential_provider
            .assume_role(
                &params.role_to_assume,
                &params.role_session_name,
                params.role_duration_seconds,
            )
            .await
            .map_err(GateError::Credential)?;

        let connection = self.connection_factory.make_connection(&credentials);
        let policy = RetryPolicy::new(params.max_retries).with_delay(params.retry_delay);

        info!(
            "Waiting for services {:?} in cluster {} to become stable",
            params.services, params.cluster
        );

        let connection = &connection;
        let attempts = retry_with_observer(
            &policy,
            move || {
                connection.check_stability(&params.cluster, &params.services, params.wait_timeout)
            },
            |event| trace_attempt(params.verbose, &event),
        )
        .await;

        let outcome = Outcome::from_attempts(params.max_retries, attempts);
        if outcome.is_success() {
            info!("Services stable after {} attempt(s)", attempts);
        }
        Ok(outcome)
    }
}

fn trace_attempt<E: std::fmt::Display>(verbose: bool, event: &RetryEvent<'_, E>) {
    match event {
        RetryEvent::Attempt {
            attempt,
            max_attempts,
        } => {
            if verbose {
                info!("Stability check attempt {}/{}", attempt, max_attempts);
            } else {
                debug!("Stability check attempt {}/{}", attempt, max_attempts);
            }
        }
        RetryEvent::Failed { attempt, cause } => {
            if verbose {
                info!("Attempt {} failed: {}", attempt, cause);
            } else {
                debug!("Attempt {} failed: {}", attempt, cause);
            }
        }
    }
}
