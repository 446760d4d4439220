//! Errors raised while assuming a role
//!
//! Only failures of the helper itself are represented here. Errors returned by
//! the caller's closure never pass through this type. The message names the
//! role; the cause is only reachable through [`std::error::Error::source`], so
//! `{:#}` on an `anyhow::Error` prints it once.

use thiserror::Error;

/// Boxed error used for causes coming from the STS client seam
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// The AssumeRole call failed or did not finish within the timeout
    #[error("failed to assume role \"{role_arn}\"")]
    AssumeRole {
        role_arn: String,
        #[source]
        source: BoxError,
    },

    /// STS answered, but no client configuration could be built from its credentials
    #[error(
        "failed to initialize new aws session with temporary credentials for assumed role \"{role_arn}\""
    )]
    SessionConstruction {
        role_arn: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn assume_role(role_arn: &str, source: impl Into<BoxError>) -> Self {
        Error::AssumeRole {
            role_arn: role_arn.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn session_construction(role_arn: &str, source: impl Into<BoxError>) -> Self {
        Error::SessionConstruction {
            role_arn: role_arn.to_string(),
            source: source.into(),
        }
    }

    /// ARN of the role the failed call tried to assume
    pub fn role_arn(&self) -> &str {
        match self {
            Error::AssumeRole { role_arn, .. } | Error::SessionConstruction { role_arn, .. } => {
                role_arn
            }
        }
    }

    /// True when the AssumeRole call was cut off by the timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::AssumeRole { source, .. } => source.is::<tokio::time::error::Elapsed>(),
            Error::SessionConstruction { .. } => false,
        }
    }
}
