//! STS role assumption

use crate::aws::{AwsError, AwsResult, CredentialProvider};
use crate::types::Credentials;
use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;

/// Assumes roles through one long-lived STS client.
#[derive(Debug, Clone)]
pub struct StsCredentialProvider {
    client: StsClient,
    region: String,
}

impl StsCredentialProvider {
    pub fn new(client: StsClient, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Build the STS client from the default credential chain, pinned to `region`.
    pub async fn from_region(region: impl Into<String>) -> Self {
        let region = region.into();
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .load()
            .await;
        Self::new(StsClient::new(&config), region)
    }
}

#[async_trait]
impl CredentialProvider for StsCredentialProvider {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        duration_seconds: i32,
    ) -> AwsResult<Credentials> {
        let response = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .duration_seconds(duration_seconds)
            .send()
            .await
            .map_err(|e| {
                AwsError::Sts(format!(
                    "AssumeRole for '{role_arn}' failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let creds = response
            .credentials()
            .ok_or_else(|| AwsError::MissingCredentials(role_arn.to_string()))?;

        Ok(Credentials {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().to_string(),
            region: self.region.clone(),
        })
    }
}
