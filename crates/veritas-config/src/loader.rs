//! Loading and validating `AppConfig`.
//!
//! `AppConfig::from_toml_str` parses and validates a document;
//! `AppConfig::from_file` reads one from disk first. Both report every
//! problem as `VeritasError::ConfigError`.

use std::{path::Path, time::Duration};

use tracing::{debug, warn};

use veritas_contracts::error::{VeritasError, VeritasResult};

use crate::settings::AppConfig;

/// Highest temperature the service accepts.
const MAX_TEMPERATURE: f32 = 2.0;

impl AppConfig {
    /// Parse `s` as TOML and validate the result.
    pub fn from_toml_str(s: &str) -> VeritasResult<Self> {
        let config: AppConfig = toml::from_str(s).map_err(|e| VeritasError::ConfigError {
            reason: format!("failed to parse configuration TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            model = %config.client.model,
            temperature = config.client.temperature,
            step_interval_ms = config.ui.step_interval_ms,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> VeritasResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VeritasError::ConfigError {
            reason: format!("failed to read configuration file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> VeritasResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values that would make the client or UI misbehave.
    pub fn validate(&self) -> VeritasResult<()> {
        let problem = if self.client.base_url.trim().is_empty() {
            Some("client.base_url must not be empty".to_string())
        } else if self.client.model.trim().is_empty() {
            Some("client.model must not be empty".to_string())
        } else if self.client.api_key_env.trim().is_empty() {
            Some("client.api_key_env must not be empty".to_string())
        } else if !(0.0..=MAX_TEMPERATURE).contains(&self.client.temperature) {
            Some(format!(
                "client.temperature must be between 0.0 and {MAX_TEMPERATURE}, got {}",
                self.client.temperature
            ))
        } else if self.client.timeout_secs == 0 {
            Some("client.timeout_secs must be at least 1".to_string())
        } else if self.ui.step_interval_ms == 0 {
            Some("ui.step_interval_ms must be at least 1".to_string())
        } else {
            None
        };

        match problem {
            Some(reason) => {
                warn!(%reason, "invalid configuration");
                Err(VeritasError::ConfigError { reason })
            }
            None => Ok(()),
        }
    }

    /// Delay between cosmetic progress stages.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.ui.step_interval_ms)
    }
}
