//! Role assumer settings
//!
//! Settings are plain JSON so they can live next to the rest of an
//! application's configuration:
//!
//! ```json
//! { "assume_role_timeout": 3 }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::assumer::DEFAULT_ASSUME_ROLE_TIMEOUT;

fn default_assume_role_timeout() -> u64 {
    DEFAULT_ASSUME_ROLE_TIMEOUT.as_secs()
}

/// Tunables for [`crate::RoleAssumer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssumerConfig {
    /// Upper bound on the AssumeRole call, in seconds
    #[serde(default = "default_assume_role_timeout")]
    pub assume_role_timeout: u64,
}

impl Default for RoleAssumerConfig {
    fn default() -> Self {
        Self {
            assume_role_timeout: default_assume_role_timeout(),
        }
    }
}

impl RoleAssumerConfig {
    /// Parse settings from a JSON document
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse role assumer settings")
    }

    /// Load settings from disk, returning defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let config = Self::from_json(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;

        tracing::info!(
            "Loaded settings: assume_role_timeout={}s",
            config.assume_role_timeout
        );

        Ok(config)
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        tracing::debug!("Saved settings to {:?}", path);

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.assume_role_timeout)
    }
}
