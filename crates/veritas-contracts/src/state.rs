//! UI state types owned by the orchestrator.

use serde::{Deserialize, Serialize};

/// Which region of the UI is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerificationState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl VerificationState {
    pub fn label(self) -> &'static str {
        match self {
            VerificationState::Idle => "idle",
            VerificationState::Loading => "loading",
            VerificationState::Success => "success",
            VerificationState::Error => "error",
        }
    }
}

/// One stage of the cosmetic progress pipeline.
///
/// `active` and `completed` are derived from the index of the currently
/// active stage. They do not reflect anything the external service reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
    pub completed: bool,
}

/// The fixed stage sequence, in display order.
pub const PROGRESS_STAGES: [(&str, &str); 5] = [
    ("ocr", "Analyzing Content Structure"),
    ("claims", "Extracting Claims"),
    ("search", "Consulting Global Repositories"),
    ("cross", "Cross-Referencing Evidence"),
    ("synth", "Synthesizing Verdict"),
];

/// All five stages, none active.
pub fn initial_progress_steps() -> Vec<ProgressStep> {
    PROGRESS_STAGES
        .iter()
        .map(|(id, label)| ProgressStep {
            id,
            label,
            active: false,
            completed: false,
        })
        .collect()
}

/// Mark stage `current` active and every earlier stage completed.
///
/// An out-of-range index leaves every stage completed and none active.
pub fn activate_progress_step(steps: &mut [ProgressStep], current: usize) {
    for (index, step) in steps.iter_mut().enumerate() {
        step.active = index == current;
        step.completed = index < current;
    }
}
