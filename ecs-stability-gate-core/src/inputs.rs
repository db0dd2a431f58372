//! Raw inputs and their resolution into [`InvocationParams`].
//!
//! Inputs arrive as strings from flags or the CI host environment. An empty
//! string is treated the same as an absent input.

use crate::error::{GateError, GateResult};
use crate::types::InvocationParams;
use std::time::Duration;

/// DescribeServices accepts at most this many services per call.
const MAX_SERVICES: usize = 10;

const DEFAULT_ROLE_SESSION_NAME: &str = "ecs-stability-gate";
const DEFAULT_ROLE_DURATION_SECONDS: i32 = 3600;
const DEFAULT_WAIT_TIMEOUT_SECONDS: u64 = 600;

/// Unvalidated inputs, one field per action input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateInputs {
    pub region: Option<String>,
    pub retries: Option<String>,
    pub ecs_cluster: Option<String>,
    pub ecs_services: Option<String>,
    pub verbose: Option<String>,
    pub role_to_assume: Option<String>,
    pub role_session_name: Option<String>,
    pub role_duration_seconds: Option<String>,
    pub wait_timeout: Option<String>,
    pub retry_delay: Option<String>,
}

/// Region from `AWS_REGION`, then `AWS_DEFAULT_REGION`.
pub fn default_region_from_env() -> Option<String> {
    ["AWS_REGION", "AWS_DEFAULT_REGION"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

impl GateInputs {
    /// Validate and convert. Performs no I/O; `default_region` is used when
    /// the `region` input is absent.
    pub fn resolve(self, default_region: Option<String>) -> GateResult<InvocationParams> {
        let role_to_assume = present(self.role_to_assume)
            .ok_or_else(|| GateError::configuration("Input 'role-to-assume' is required"))?;

        let region = present(self.region)
            .or_else(|| present(default_region))
            .ok_or_else(|| {
                GateError::configuration(
                    "Region is required: set the 'region' input or AWS_REGION",
                )
            })?;

        let retries = present(self.retries)
            .ok_or_else(|| GateError::configuration("Input 'retries' is required"))?;
        let max_retries = parse_retries(&retries)?;

        let cluster = present(self.ecs_cluster)
            .ok_or_else(|| GateError::configuration("Input 'ecs-cluster' is required"))?;

        let services = present(self.ecs_services)
            .ok_or_else(|| GateError::configuration("Input 'ecs-services' is required"))?;
        let services = parse_services(&services)?;

        let role_session_name = present(self.role_session_name)
            .unwrap_or_else(|| DEFAULT_ROLE_SESSION_NAME.to_string());

        let role_duration_seconds = match present(self.role_duration_seconds) {
            Some(raw) => raw.parse::<i32>().ok().filter(|v| *v > 0).ok_or_else(|| {
                GateError::configuration(format!(
                    "Input 'role-duration-seconds' must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_ROLE_DURATION_SECONDS,
        };

        let wait_timeout = match present(self.wait_timeout) {
            Some(raw) => parse_seconds("wait-timeout", &raw)?,
            None => Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECONDS),
        };
        if wait_timeout.is_zero() {
            return Err(GateError::configuration(
                "Input 'wait-timeout' must be greater than zero",
            ));
        }

        let retry_delay = match present(self.retry_delay) {
            Some(raw) => parse_seconds("retry-delay", &raw)?,
            None => Duration::ZERO,
        };

        let verbose = present(self.verbose).is_some_and(|v| v.eq_ignore_ascii_case("true"));

        Ok(InvocationParams {
            region,
            cluster,
            services,
            max_retries,
            verbose,
            role_to_assume,
            role_session_name,
            role_duration_seconds,
            wait_timeout,
            retry_delay,
        })
    }
}

/// Trim and drop empty values.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_retries(raw: &str) -> GateResult<u32> {
    match raw.parse::<u32>() {
        Ok(0) => Err(GateError::configuration(
            "Input 'retries' must be at least 1",
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(GateError::configuration(format!(
            "Input 'retries' must be a decimal integer, got '{raw}': {e}"
        ))),
    }
}

/// Parse a JSON array of service names, keeping their order.
fn parse_services(raw: &str) -> GateResult<Vec<String>> {
    let services: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        GateError::configuration(format!(
            "Input 'ecs-services' must be a JSON array of strings: {e}"
        ))
    })?;

    if services.is_empty() {
        return Err(GateError::configuration(
            "Input 'ecs-services' must name at least one service",
        ));
    }
    if services.len() > MAX_SERVICES {
        return Err(GateError::configuration(format!(
            "Input 'ecs-services' names {} services; at most {MAX_SERVICES} can be checked at once",
            services.len()
        )));
    }
    if services.iter().any(|s| s.trim().is_empty()) {
        return Err(GateError::configuration(
            "Input 'ecs-services' contains an empty service name",
        ));
    }
    Ok(services)
}

fn parse_seconds(name: &str, raw: &str) -> GateResult<Duration> {
    raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
        GateError::configuration(format!(
            "Input '{name}' must be a whole number of seconds, got '{raw}': {e}"
        ))
    })
}
