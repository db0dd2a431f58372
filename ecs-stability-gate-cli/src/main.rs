//! ECS Stability Gate
//!
//! Waits for Amazon ECS services to become stable after a deployment,
//! retrying the services-stable waiter a bounded number of times.
//!
//! # Usage
//! ```bash
//! # As flags
//! ecs-stability-gate \
//!   --role-to-assume arn:aws:iam::123456789012:role/deployer \
//!   --region us-east-1 \
//!   --ecs-cluster production \
//!   --ecs-services '["api","worker"]' \
//!   --retries 3
//!
//! # As CI action inputs
//! INPUT_ROLE-TO-ASSUME=arn:aws:iam::123456789012:role/deployer \
//! INPUT_ECS-CLUSTER=production \
//! INPUT_ECS-SERVICES='["api","worker"]' \
//! INPUT_RETRIES=3 \
//! ecs-stability-gate
//! ```

use clap::Parser;
use ecs_stability_gate_core::{
    default_region_from_env, evaluate, GateError, GateInputs, Outcome, StabilityGateService,
};
use log::{error, info};
use std::process::ExitCode;

mod output;

use output::Reporter;

/// Wait for ECS services to become stable
#[derive(Parser, Debug)]
#[command(name = "ecs-stability-gate")]
#[command(about = "Wait for Amazon ECS services to reach a stable state, retrying a bounded number of times")]
#[command(version)]
struct Cli {
    /// AWS region (falls back to AWS_REGION, then AWS_DEFAULT_REGION)
    #[arg(long, env = "INPUT_REGION")]
    region: Option<String>,

    /// Maximum number of stability check attempts
    #[arg(long, env = "INPUT_RETRIES")]
    retries: Option<String>,

    /// ECS cluster name or ARN
    #[arg(long = "ecs-cluster", env = "INPUT_ECS-CLUSTER")]
    ecs_cluster: Option<String>,

    /// JSON array of ECS service names, e.g. '["api","worker"]'
    #[arg(long = "ecs-services", env = "INPUT_ECS-SERVICES")]
    ecs_services: Option<String>,

    /// "true" to log every attempt
    #[arg(long, env = "INPUT_VERBOSE")]
    verbose: Option<String>,

    /// ARN of the role to assume before talking to ECS
    #[arg(long = "role-to-assume", env = "INPUT_ROLE-TO-ASSUME")]
    role_to_assume: Option<String>,

    /// Session name for the assumed role
    #[arg(long = "role-session-name", env = "INPUT_ROLE-SESSION-NAME")]
    role_session_name: Option<String>,

    /// Lifetime of the assumed role credentials, in seconds
    #[arg(long = "role-duration-seconds", env = "INPUT_ROLE-DURATION-SECONDS")]
    role_duration_seconds: Option<String>,

    /// Seconds a single stability check may wait
    #[arg(long = "wait-timeout", env = "INPUT_WAIT-TIMEOUT")]
    wait_timeout: Option<String>,

    /// Seconds to pause between failed attempts
    #[arg(long = "retry-delay", env = "INPUT_RETRY-DELAY")]
    retry_delay: Option<String>,
}

impl Cli {
    fn is_verbose(&self) -> bool {
        self.verbose
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    fn into_inputs(self) -> GateInputs {
        GateInputs {
            region: self.region,
            retries: self.retries,
            ecs_cluster: self.ecs_cluster,
            ecs_services: self.ecs_services,
            verbose: self.verbose,
            role_to_assume: self.role_to_assume,
            role_session_name: self.role_session_name,
            role_duration_seconds: self.role_duration_seconds,
            wait_timeout: self.wait_timeout,
            retry_delay: self.retry_delay,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.is_verbose());

    let outcome = evaluate(cli.into_inputs(), default_region_from_env(), |params| {
        StabilityGateService::for_region(params.region.clone())
    })
    .await;

    let reporter = Reporter::from_env();
    let outcome = match reporter.report_success(&outcome) {
        Ok(()) => outcome,
        Err(e) => Outcome::ProviderError(GateError::unknown(format!(
            "Failed to write outputs: {e:#}"
        ))),
    };

    match outcome.failure_message() {
        None => {
            info!("Deployment gate passed");
            ExitCode::SUCCESS
        }
        Some(message) => {
            error!("{}", message);
            reporter.report_failure(&message);
            ExitCode::FAILURE
        }
    }
}
