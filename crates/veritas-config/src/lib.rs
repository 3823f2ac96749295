//! # veritas-config
//!
//! TOML configuration for VERITAS Pro.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use veritas_config::AppConfig;
//!
//! let config = AppConfig::load(Some(Path::new("veritas.toml")))?;
//! ```
//!
//! Without a file every setting takes its default: the
//! `gemini-3-pro-preview` model at temperature 0.1, the credential in
//! `API_KEY`, and an 800 ms progress interval.

pub mod loader;
pub mod settings;

pub use settings::{AppConfig, ClientSettings, UiSettings};

// ── Tests ─────────────────────────────────────────────────────────────────────
