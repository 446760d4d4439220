//! STS data types

use std::fmt;
use std::time::SystemTime;

use aws_config::SdkConfig;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_sts::operation::assume_role::AssumeRoleOutput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider name attached to the static credentials of a scoped session
const PROVIDER_NAME: &str = "AssumedRole";

/// Parameters of a single STS AssumeRole call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssumptionRequest {
    pub role_arn: String,
    pub role_session_name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<i32>,
    /// Inline session policy (JSON document)
    #[serde(default)]
    pub policy: Option<String>,
    /// Managed session policies
    #[serde(default)]
    pub policy_arns: Vec<String>,
    /// MFA device serial number, sent together with `token_code`
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub token_code: Option<String>,
    #[serde(default)]
    pub source_identity: Option<String>,
}

impl RoleAssumptionRequest {
    /// Create a request for the given role and session name
    pub fn new(role_arn: impl Into<String>, role_session_name: impl Into<String>) -> Self {
        Self {
            role_arn: role_arn.into(),
            role_session_name: role_session_name.into(),
            external_id: None,
            duration_seconds: None,
            policy: None,
            policy_arns: Vec::new(),
            serial_number: None,
            token_code: None,
            source_identity: None,
        }
    }

    /// Create a request whose session name is the current Unix time in nanoseconds
    pub fn with_generated_session_name(role_arn: impl Into<String>) -> Self {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::new(role_arn, nanos.to_string())
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn duration_seconds(mut self, seconds: i32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = Some(policy.into());
        self
    }

    pub fn policy_arn(mut self, arn: impl Into<String>) -> Self {
        self.policy_arns.push(arn.into());
        self
    }

    /// Attach an MFA device and the current code it shows
    pub fn mfa(mut self, serial_number: impl Into<String>, token_code: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self.token_code = Some(token_code.into());
        self
    }

    pub fn source_identity(mut self, source_identity: impl Into<String>) -> Self {
        self.source_identity = Some(source_identity.into());
        self
    }
}

/// Why an AssumeRole response could not be turned into credentials
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("AWS STS returned no credentials")]
    Missing,
    #[error("credential expiration {0} is out of range")]
    InvalidExpiration(i64),
}

/// Temporary credentials returned by AssumeRole
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

impl TemporaryCredentials {
    /// Extract the credentials from an AssumeRole response
    pub fn from_output(output: &AssumeRoleOutput) -> Result<Self, CredentialsError> {
        let sts_creds = output.credentials().ok_or(CredentialsError::Missing)?;

        let expiration = sts_creds.expiration();
        let expiration = DateTime::from_timestamp(expiration.secs(), expiration.subsec_nanos())
            .ok_or(CredentialsError::InvalidExpiration(expiration.secs()))?;

        Ok(Self {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration,
        })
    }
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Client configuration whose identity is an assumed role
///
/// Everything except the credentials provider is inherited from the base
/// configuration, so region, retry and HTTP settings carry over. Pass
/// [`ScopedSession::config`] to any SDK client constructor.
#[derive(Debug, Clone)]
pub struct ScopedSession {
    role_arn: String,
    credentials: TemporaryCredentials,
    config: SdkConfig,
}

impl ScopedSession {
    pub fn new(base: &SdkConfig, role_arn: &str, credentials: TemporaryCredentials) -> Self {
        let provider = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            Some(credentials.session_token.clone()),
            Some(SystemTime::from(credentials.expiration)),
            PROVIDER_NAME,
        );

        let config = base
            .to_builder()
            .credentials_provider(SharedCredentialsProvider::new(provider))
            .build();

        Self {
            role_arn: role_arn.to_string(),
            credentials,
            config,
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn into_config(self) -> SdkConfig {
        self.config
    }

    pub fn credentials(&self) -> &TemporaryCredentials {
        &self.credentials
    }

    pub fn expiration(&self) -> DateTime<Utc> {
        self.credentials.expiration
    }

    /// ARN of the role this session acts as
    pub fn role_arn(&self) -> &str {
        &self.role_arn
    }
}
