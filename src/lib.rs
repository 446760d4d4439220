//! Assumed-role helper library
//!
//! This crate assumes an AWS IAM role through STS and runs a caller-supplied
//! closure with an [`aws_config::SdkConfig`] whose identity is the temporary
//! credentials of that role.
//!
//! ```no_run
//! use awsar::{with_assumed_role, RoleAssumptionRequest};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let base = aws_config::load_from_env().await;
//! let request = RoleAssumptionRequest::with_generated_session_name(
//!     "arn:aws:iam::123456789012:role/CloudWatchWriteRole",
//! )
//! .external_id("super-secret-external-id")
//! .duration_seconds(900);
//!
//! let arn = with_assumed_role(&base, request, |session| async move {
//!     let sts = aws_sdk_sts::Client::new(session.config());
//!     let identity = sts.get_caller_identity().send().await?;
//!     Ok::<_, anyhow::Error>(identity.arn().unwrap_or_default().to_string())
//! })
//! .await?;
//! println!("running as {arn}");
//! # Ok(())
//! # }
//! ```

pub mod assumer;
pub mod error;
pub mod settings;
pub mod sts;

// Re-export commonly used types
pub use assumer::{with_assumed_role, RoleAssumer, DEFAULT_ASSUME_ROLE_TIMEOUT};
pub use error::{BoxError, Error};
pub use settings::RoleAssumerConfig;
pub use sts::{AssumeRoleClient, RoleAssumptionRequest, ScopedSession, TemporaryCredentials};
