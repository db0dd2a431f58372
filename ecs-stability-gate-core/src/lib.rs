//! This crate provides the core logic of the ECS stability gate:
//! - Input resolution and validation
//! - Bounded retry of the services-stable waiter
//! - Role assumption and ECS connection construction
//!

mod aws;
pub mod commands;
mod error;
mod inputs;
pub mod retry;
mod types;

// Re-exports for a small, focused public API
pub use aws::ecs_client::{EcsConnection, EcsConnectionFactory};
pub use aws::sts::StsCredentialProvider;
pub use aws::{AwsError, AwsResult, ConnectionFactory, CredentialProvider, StabilityCheck};
pub use commands::{evaluate, StabilityGateService};
pub use error::{GateError, GateResult, StabilityCheckFailure};
pub use inputs::{default_region_from_env, GateInputs};
pub use retry::{retry, retry_with_observer, RetryEvent, RetryPolicy};
pub use types::{Credentials, InvocationParams, Outcome};
