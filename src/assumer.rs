//! Assume a role and run a closure as that role

use std::future::Future;
use std::time::Duration;

use aws_config::SdkConfig;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::settings::RoleAssumerConfig;
use crate::sts::{AssumeRoleClient, RoleAssumptionRequest, ScopedSession, TemporaryCredentials};

/// Upper bound on the AssumeRole call unless configured otherwise
pub const DEFAULT_ASSUME_ROLE_TIMEOUT: Duration = Duration::from_secs(3);

/// Assume `request.role_arn` using `base` and run `f` with the resulting session.
///
/// Shorthand for [`RoleAssumer::new`] followed by [`RoleAssumer::run`].
pub async fn with_assumed_role<F, Fut, T, E>(
    base: &SdkConfig,
    request: RoleAssumptionRequest,
    f: F,
) -> Result<T, E>
where
    F: FnOnce(ScopedSession) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<Error>,
{
    RoleAssumer::new(base).run(request, f).await
}

/// Performs AssumeRole calls against a base configuration
///
/// Holds no credentials between calls: every [`RoleAssumer::run`] assumes the
/// role again, so a single assumer can be shared by concurrent callers.
pub struct RoleAssumer<C = StsClient> {
    client: C,
    base: SdkConfig,
    timeout: Duration,
}

impl RoleAssumer<StsClient> {
    /// Create an assumer that calls STS with the identity of `base`
    pub fn new(base: &SdkConfig) -> Self {
        Self::with_client(StsClient::new(base), base)
    }

    /// Create an assumer from a base configuration and assumer settings
    pub fn from_config(base: &SdkConfig, config: &RoleAssumerConfig) -> Self {
        Self::new(base).with_timeout(config.timeout())
    }
}

impl<C: AssumeRoleClient> RoleAssumer<C> {
    /// Create an assumer around any [`AssumeRoleClient`]
    ///
    /// `base` is still the configuration scoped sessions are derived from.
    pub fn with_client(client: C, base: &SdkConfig) -> Self {
        Self {
            client,
            base: base.clone(),
            timeout: DEFAULT_ASSUME_ROLE_TIMEOUT,
        }
    }

    /// Override the bound on the AssumeRole call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The STS client this assumer calls, e.g. to inspect a stub in tests
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Assume the requested role and run `f` with a session scoped to it.
    ///
    /// Only the AssumeRole call is bounded by [`RoleAssumer::timeout`]; `f`
    /// runs for as long as the caller keeps polling the returned future.
    /// Whatever `f` returns is passed back untouched. If the role cannot be
    /// assumed, `f` is never called and the [`Error`] is converted into `E`.
    pub async fn run<F, Fut, T, E>(&self, request: RoleAssumptionRequest, f: F) -> Result<T, E>
    where
        F: FnOnce(ScopedSession) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<Error>,
    {
        let session = self.assume(&request).await?;
        f(session).await
    }

    async fn assume(&self, request: &RoleAssumptionRequest) -> Result<ScopedSession, Error> {
        let role_arn = request.role_arn.as_str();
        info!("Calling AWS STS AssumeRole for {}", role_arn);
        debug!("Timeout: {:?}", self.timeout);

        let output = match tokio::time::timeout(self.timeout, self.client.assume_role(request)).await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(
                    "Failed to assume role {}: {}",
                    role_arn,
                    DisplayErrorContext(e.as_ref())
                );
                return Err(Error::assume_role(role_arn, e));
            }
            Err(elapsed) => {
                warn!(
                    "AssumeRole for {} did not complete within {:?}",
                    role_arn, self.timeout
                );
                return Err(Error::assume_role(role_arn, elapsed));
            }
        };

        let credentials = TemporaryCredentials::from_output(&output).map_err(|e| {
            warn!("Unusable credentials for role {}: {}", role_arn, e);
            Error::session_construction(role_arn, e)
        })?;

        info!(
            "Successfully assumed role {} (session {}, expires {})",
            role_arn, request.role_session_name, credentials.expiration
        );
        Ok(ScopedSession::new(&self.base, role_arn, credentials))
    }
}
