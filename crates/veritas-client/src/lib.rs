//! # veritas-client
//!
//! The I/O edge of VERITAS Pro: the Gemini-backed `VerificationClient` and
//! the image file loader. Nothing else in the workspace talks to the network
//! or reads user files.

pub mod gemini;
pub mod image;
pub mod prompt;
pub mod wire;

pub use gemini::GeminiClient;
pub use image::load_image;
