//! Top-level sequencing for one gate run

use crate::aws::{ConnectionFactory, CredentialProvider};
use crate::commands::service::StabilityGateService;
use crate::inputs::GateInputs;
use crate::types::{InvocationParams, Outcome};
use std::future::Future;

/// Resolve inputs, build the service, and wait for stability.
///
/// `build` runs only after the inputs validate, so a configuration failure
/// never constructs a client or touches the network. Every error is caught
/// here once and returned as [`Outcome::ProviderError`].
pub async fn evaluate<P, F, B, Fut>(
    inputs: GateInputs,
    default_region: Option<String>,
    build: B,
) -> Outcome
where
    P: CredentialProvider,
    F: ConnectionFactory,
    B: FnOnce(&InvocationParams) -> Fut,
    Fut: Future<Output = StabilityGateService<P, F>>,
{
    let params = match inputs.resolve(default_region) {
        Ok(params) => params,
        Err(e) => return Outcome::ProviderError(e),
    };

    let service = build(&params).await;
    service
        .wait_for_stability(&params)
        .await
        .unwrap_or_else(Outcome::from)
}
