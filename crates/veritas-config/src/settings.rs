//! Configuration schema.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. Unknown keys are rejected so typos surface at startup.
//!
//! Example:
//! ```toml
//! [client]
//! model = "gemini-3-pro-preview"
//! temperature = 0.1
//! api_key_env = "API_KEY"
//!
//! [ui]
//! step_interval_ms = 800
//! ```

use serde::{Deserialize, Serialize};

/// Settings for the external verification client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSettings {
    /// Base URL of the generative language API, without a trailing slash.
    pub base_url: String,
    /// Model name inserted into `/models/{model}:generateContent`.
    pub model: String,
    /// Sampling temperature. Kept low for deterministic-leaning output.
    pub temperature: f32,
    /// Environment variable holding the access credential.
    pub api_key_env: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            temperature: 0.1,
            api_key_env: "API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Settings for the interactive front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiSettings {
    /// Delay between cosmetic progress stages, in milliseconds.
    pub step_interval_ms: u64,
    /// Icon lookup endpoint; the source hostname is appended.
    pub favicon_endpoint: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            step_interval_ms: 800,
            favicon_endpoint: "https://www.google.com/s2/favicons?sz=64&domain=".to_string(),
        }
    }
}

/// The top-level structure deserialized from a TOML configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub ui: UiSettings,
}
