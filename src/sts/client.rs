//! AWS STS client seam

use async_trait::async_trait;
use aws_sdk_sts::operation::assume_role::AssumeRoleOutput;
use aws_sdk_sts::types::PolicyDescriptorType;
use aws_sdk_sts::Client as StsClient;
use tracing::debug;

use super::types::RoleAssumptionRequest;
use crate::error::BoxError;

/// Anything able to perform the STS AssumeRole operation
///
/// Implemented for [`aws_sdk_sts::Client`]. Retries and transport timeouts are
/// whatever the implementation's own configuration says.
#[async_trait]
pub trait AssumeRoleClient: Send + Sync {
    async fn assume_role(
        &self,
        request: &RoleAssumptionRequest,
    ) -> Result<AssumeRoleOutput, BoxError>;
}

#[async_trait]
impl AssumeRoleClient for StsClient {
    async fn assume_role(
        &self,
        request: &RoleAssumptionRequest,
    ) -> Result<AssumeRoleOutput, BoxError> {
        debug!(
            role_arn = %request.role_arn,
            session_name = %request.role_session_name,
            duration_seconds = ?request.duration_seconds,
            external_id = request.external_id.is_some(),
            inline_policy = request.policy.is_some(),
            policy_arns = request.policy_arns.len(),
            mfa = request.serial_number.is_some(),
            "Sending AssumeRole request"
        );

        let policy_arns = (!request.policy_arns.is_empty()).then(|| {
            request
                .policy_arns
                .iter()
                .map(|arn| PolicyDescriptorType::builder().arn(arn).build())
                .collect::<Vec<_>>()
        });

        let output = StsClient::assume_role(self)
            .role_arn(&request.role_arn)
            .role_session_name(&request.role_session_name)
            .set_external_id(request.external_id.clone())
            .set_duration_seconds(request.duration_seconds)
            .set_policy(request.policy.clone())
            .set_policy_arns(policy_arns)
            .set_serial_number(request.serial_number.clone())
            .set_token_code(request.token_code.clone())
            .set_source_identity(request.source_identity.clone())
            .send()
            .await?;

        Ok(output)
    }
}
