use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;

use vending_core::clients::IdentityClient;
use vending_core::types::{CallerIdentity, DelegatedCredential};
use vending_core::{Result, VendingError};

// ─── StsIdentity ──────────────────────────────────────────────────────────

/// Identity client backed by AWS STS.
///
/// Role assumption uses the ambient identity (instance profile, environment
/// variables, or shared config); caller-identity lookups run under the
/// delegated credential so the log line shows the assumed role, not the
/// service host.
pub struct StsIdentity {
    client: aws_sdk_sts::Client,
    region: String,
}

impl StsIdentity {
    /// Build from the ambient environment, pinned to `region`.
    pub async fn from_env(region: &str) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_sts::Client::new(&sdk_config),
            region: region.to_string(),
        }
    }

    /// STS client scoped to the delegated credential of one invocation.
    fn delegated_client(&self, credential: &DelegatedCredential) -> aws_sdk_sts::Client {
        let creds = aws_sdk_sts::config::Credentials::new(
            credential.access_key_id.clone(),
            credential.secret_access_key.clone(),
            Some(credential.session_token.clone()),
            None,
            "account-vending-delegated",
        );
        let config = aws_sdk_sts::Config::builder()
            .behavior_version(aws_sdk_sts::config::BehaviorVersion::latest())
            .region(aws_sdk_sts::config::Region::new(self.region.clone()))
            .credentials_provider(creds)
            .build();
        aws_sdk_sts::Client::from_conf(config)
    }
}

#[async_trait]
impl IdentityClient for StsIdentity {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<DelegatedCredential> {
        let response = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| VendingError::Credential {
                role_arn: role_arn.to_string(),
                reason: format!("{}", DisplayErrorContext(&e)),
            })?;

        let creds = response
            .credentials()
            .ok_or_else(|| VendingError::Credential {
                role_arn: role_arn.to_string(),
                reason: "AssumeRole response carried no credentials".to_string(),
            })?;

        tracing::debug!(role_arn, session_name, "assumed delegated role");

        Ok(DelegatedCredential {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().to_string(),
        })
    }

    async fn caller_identity(&self, credential: &DelegatedCredential) -> Result<CallerIdentity> {
        let response = self
            .delegated_client(credential)
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| VendingError::Remote(format!(
                "GetCallerIdentity failed: {}",
                DisplayErrorContext(&e)
            )))?;

        Ok(CallerIdentity {
            account: response.account().map(str::to_string),
            arn: response.arn().map(str::to_string),
            user_id: response.user_id().map(str::to_string),
        })
    }
}
