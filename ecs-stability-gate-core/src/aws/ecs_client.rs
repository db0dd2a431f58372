//! ECS connection construction and the services-stable waiter

use crate::aws::{ConnectionFactory, StabilityCheck};
use crate::error::StabilityCheckFailure;
use crate::types::Credentials;
use async_trait::async_trait;
use aws_sdk_ecs::client::Waiters;
use aws_sdk_ecs::config::{BehaviorVersion, Region};
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::Client as EcsClient;
use aws_smithy_runtime_api::client::waiters::error::WaiterError;
use std::time::Duration;

/// Provider name attached to the static credentials handed to the ECS client.
const CREDENTIALS_PROVIDER_NAME: &str = "ecs-stability-gate-assume-role";

/// Builds ECS clients from assumed-role credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcsConnectionFactory;

impl ConnectionFactory for EcsConnectionFactory {
    type Connection = EcsConnection;

    fn make_connection(&self, credentials: &Credentials) -> EcsConnection {
        let static_credentials = aws_sdk_ecs::config::Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            Some(credentials.session_token.clone()),
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let config = aws_sdk_ecs::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(static_credentials)
            .build();

        EcsConnection::new(EcsClient::from_conf(config))
    }
}

/// Connection handle for the stability check.
#[derive(Debug, Clone)]
pub struct EcsConnection {
    client: EcsClient,
}

impl EcsConnection {
    pub fn new(client: EcsClient) -> Self {
        Self { client }
    }

    pub fn region(&self) -> Option<&Region> {
        self.client.config().region()
    }
}

#[async_trait]
impl StabilityCheck for EcsConnection {
    async fn check_stability(
        &self,
        cluster: &str,
        services: &[String],
        max_wait: Duration,
    ) -> Result<(), StabilityCheckFailure> {
        self.client
            .wait_until_services_stable()
            .cluster(cluster)
            .set_services(Some(services.to_vec()))
            .wait(max_wait)
            .await
            .map(|_| ())
            .map_err(|e| match &e {
                WaiterError::ExceededMaxWait(_) => StabilityCheckFailure::TimedOut(max_wait),
                WaiterError::FailureState(_) => {
                    StabilityCheckFailure::FailureState(DisplayErrorContext(&e).to_string())
                }
                _ => StabilityCheckFailure::Request(DisplayErrorContext(&e).to_string()),
            })
    }
}
