//! Configuration handling for the TUI

use crate::state::VALIDATION_DEBOUNCE;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the submission endpoint
pub const ENDPOINT_ENV: &str = "DEEPHULL_SUBMIT_ENDPOINT";

/// How long a submission may take before it counts as failed
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Phone number shown in the header and the failure banner
pub const DEFAULT_BUSINESS_PHONE: &str = "(904) 570-0910";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// URL forms are POSTed to
    pub submit_endpoint: Option<String>,
    /// Quiet period before a field is re-validated, in milliseconds
    pub debounce_ms: Option<u64>,
    /// Upper bound on one submission request, in seconds
    pub submit_timeout_secs: Option<u64>,
    /// Business phone number
    pub business_phone: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "deephull", "deephull-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Submission endpoint, preferring the environment over the file
    pub fn endpoint(&self) -> Option<String> {
        self.endpoint_with_override(std::env::var(ENDPOINT_ENV).ok())
    }

    fn endpoint_with_override(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.submit_endpoint.clone())
    }

    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(VALIDATION_DEBOUNCE)
    }

    pub fn submit_timeout(&self) -> Duration {
        self.submit_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SUBMIT_TIMEOUT)
    }

    pub fn business_phone(&self) -> &str {
        self.business_phone
            .as_deref()
            .unwrap_or(DEFAULT_BUSINESS_PHONE)
    }
}
