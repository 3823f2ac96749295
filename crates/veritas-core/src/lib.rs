//! # veritas-core
//!
//! The verification orchestrator for VERITAS Pro.
//!
//! This crate provides:
//! - The `VerificationClient` trait, the sole seam to the external service
//! - The `Orchestrator`, a reducer over `VerificationState`
//! - `ProgressTimers`, the queue behind the cosmetic progress pipeline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veritas_core::{Action, Command, Orchestrator, orchestrator::execute};
//!
//! let mut orchestrator = Orchestrator::new(Duration::from_millis(800));
//! orchestrator.dispatch(Action::EditText("The moon is made of cheese".into()));
//! if let Some(Command::Verify { request, .. }) = orchestrator.dispatch(Action::Submit) {
//!     let outcome = execute(&client, &request);
//!     orchestrator.dispatch(outcome);
//! }
//! ```

pub mod orchestrator;
pub mod progress;
pub mod traits;

pub use orchestrator::{Action, Command, ImageTicket, Orchestrator};
pub use progress::{ProgressSchedule, ProgressTimers};
