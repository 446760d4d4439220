//! STS wrapper module
//!
//! This module provides the pieces the role assumer is built from:
//! - [`client::AssumeRoleClient`] - the seam over the STS AssumeRole operation
//! - [`types`] - request, temporary credentials and the scoped session

pub mod client;
pub mod types;

// Re-export commonly used types
pub use client::AssumeRoleClient;
pub use types::{CredentialsError, RoleAssumptionRequest, ScopedSession, TemporaryCredentials};
