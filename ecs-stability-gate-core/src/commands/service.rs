//! Stability Gate Service Layer
//!
//! The service holds the credential provider and the connection factory and
//! exposes the gate operation. Both collaborators are constructed by the
//! caller and passed in, so nothing here reaches for process-wide state.

use crate::aws::ecs_client::EcsConnectionFactory;
use crate::aws::sts::StsCredentialProvider;

/// Main service struct that holds the AWS collaborators
pub struct StabilityGateService<P, F> {
    pub(crate) credential_provider: P,
    pub(crate) connection_factory: F,
}

impl<P, F> StabilityGateService<P, F> {
    pub fn new(credential_provider: P, connection_factory: F) -> Self {
        Self {
            credential_provider,
            connection_factory,
        }
    }

    // wait_for_stability() implementation is in wait.rs
}

impl StabilityGateService<StsCredentialProvider, EcsConnectionFactory> {
    /// Create a service backed by STS and ECS in `region`.
    ///
    /// The STS client uses the standard credential provider chain. Loading
    /// the configuration does not call AWS.
    pub async fn for_region(region: String) -> Self {
        Self::new(
            StsCredentialProvider::from_region(region).await,
            EcsConnectionFactory,
        )
    }
}
