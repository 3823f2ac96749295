//! Error types for the VERITAS Pro front-end.
//!
//! Every fallible operation returns `VeritasResult<T>`. Adapter errors
//! (HTTP, JSON, I/O, TOML) are mapped into these variants at the crate
//! boundary so the orchestrator only ever sees one error type.

use thiserror::Error;

/// The unified error type for the VERITAS Pro crates.
#[derive(Debug, Error)]
pub enum VeritasError {
    /// A configuration value is missing, malformed, or unreadable.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The access credential for the external service is not set.
    ///
    /// Raised before any network I/O is attempted.
    #[error("API Key is missing from the environment.")]
    CredentialMissing {
        /// Name of the environment variable that was consulted.
        variable: String,
    },

    /// The external verification service rejected the request or could not
    /// be reached. `message` is shown to the user verbatim.
    #[error("{message}")]
    Remote { message: String },

    /// An attached image could not be read from disk.
    #[error("failed to read image '{path}': {reason}")]
    ImageRead { path: String, reason: String },

    /// A saved report document could not be read.
    #[error("failed to read report '{path}': {reason}")]
    ReportRead { path: String, reason: String },

    /// A value could not be encoded for output.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// The orchestrator was asked to do something its current state forbids.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },
}

impl VeritasError {
    /// Message shown in the error panel.
    ///
    /// Configuration and remote failures surface their own text; a remote
    /// failure with no text at all falls back to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            VeritasError::Remote { message } if message.trim().is_empty() => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Shown when the remote failure carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during verification.";

/// Convenience alias used throughout the VERITAS crates.
pub type VeritasResult<T> = Result<T, VeritasError>;
