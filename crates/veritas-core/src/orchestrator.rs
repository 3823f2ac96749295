//! The VERITAS Pro orchestrator: a reducer over the verification state.
//!
//! The orchestrator enforces the UI state machine:
//!
//!   Idle ──submit──▶ Loading ──resolved──▶ Success
//!                       │
//!                       └────rejected──▶ Error ──retry──▶ Loading
//!
//!   any ──clear──▶ Idle
//!
//! It owns no threads and performs no I/O. Every transition happens inside
//! `dispatch()`, which may hand back a `Command` for the host to execute.
//! Results come back as further actions tagged with the generation they
//! were started under; anything from a superseded generation is dropped.

use std::{path::PathBuf, time::Duration};

use tracing::{debug, info, warn};

use veritas_contracts::{
    request::{ImageAttachment, RequestGeneration, RequestId, VerificationRequest},
    response::FactCheckResponse,
    state::{activate_progress_step, initial_progress_steps, ProgressStep, VerificationState},
};

use crate::{progress::ProgressSchedule, traits::VerificationClient};

/// Identifies one image read. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageTicket(pub u64);

/// Everything that can happen to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the input text.
    EditText(String),
    /// Start a verification with the current input.
    Submit,
    /// Re-submit the current input after a failure.
    Retry,
    /// Reset every piece of state back to Idle.
    Clear,
    /// The user picked an image file; the host should read it.
    ImageSelected(PathBuf),
    /// An image read finished.
    ImageLoaded {
        ticket: ImageTicket,
        image: ImageAttachment,
    },
    /// An image read failed.
    ImageFailed { ticket: ImageTicket, reason: String },
    /// Detach the current image and forget any pending read.
    RemoveImage,
    /// A cosmetic progress timer fired.
    ProgressTick {
        generation: RequestGeneration,
        step: usize,
    },
    /// The external call returned a report.
    Resolved {
        generation: RequestGeneration,
        response: FactCheckResponse,
    },
    /// The external call failed.
    Rejected {
        generation: RequestGeneration,
        message: String,
    },
}

/// Work the host must carry out on the orchestrator's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Call the external service, then dispatch `Resolved` / `Rejected`.
    /// Start the progress schedule alongside it.
    Verify {
        request: VerificationRequest,
        progress: ProgressSchedule,
    },
    /// Read the image at `path`, then dispatch `ImageLoaded` / `ImageFailed`.
    LoadImage { ticket: ImageTicket, path: PathBuf },
    /// Drop every pending progress tick.
    CancelProgress,
}

/// The verification state machine.
///
/// Construct one per UI session. All fields are private; the UI reads them
/// through accessors and changes them only via `dispatch()`.
#[derive(Debug)]
pub struct Orchestrator {
    state: VerificationState,
    input_text: String,
    image: Option<ImageAttachment>,
    result: Option<FactCheckResponse>,
    error: Option<String>,
    notice: Option<String>,
    steps: Vec<ProgressStep>,
    generation: RequestGeneration,
    image_ticket: ImageTicket,
    image_pending: bool,
    step_interval: Duration,
}

impl Orchestrator {
    /// Create an idle orchestrator whose progress stages advance every
    /// `step_interval`.
    pub fn new(step_interval: Duration) -> Self {
        Self {
            state: VerificationState::Idle,
            input_text: String::new(),
            image: None,
            result: None,
            error: None,
            notice: None,
            steps: initial_progress_steps(),
            generation: RequestGeneration::default(),
            image_ticket: ImageTicket::default(),
            image_pending: false,
            step_interval,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> VerificationState {
        self.state
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&FactCheckResponse> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A transient, non-fatal message (e.g. an image that failed to load).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn progress_steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    pub fn generation(&self) -> RequestGeneration {
        self.generation
    }

    /// True while an image read is outstanding.
    pub fn image_pending(&self) -> bool {
        self.image_pending
    }

    /// Whether the submit trigger is enabled.
    ///
    /// Disabled while Loading, and when there is neither text nor an image.
    pub fn can_submit(&self) -> bool {
        self.state != VerificationState::Loading && self.has_input()
    }

    fn has_input(&self) -> bool {
        !self.input_text.trim().is_empty() || self.image.is_some()
    }

    // ── Reducer ───────────────────────────────────────────────────────────────

    /// Apply one action and return the command the host must run, if any.
    pub fn dispatch(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::EditText(text) => {
                self.input_text = text;
                None
            }

            Action::Submit => self.submit(),

            Action::Retry => {
                if self.state != VerificationState::Error {
                    debug!(state = self.state.label(), "retry ignored outside error state");
                    return None;
                }
                self.submit()
            }

            Action::Clear => {
                // Bumping both counters orphans any in-flight call, timer,
                // or image read.
                self.generation = self.generation.next();
                self.image_ticket = ImageTicket(self.image_ticket.0 + 1);
                self.image_pending = false;
                self.state = VerificationState::Idle;
                self.input_text.clear();
                self.image = None;
                self.result = None;
                self.error = None;
                self.notice = None;
                self.steps = initial_progress_steps();
                info!(generation = %self.generation, "state cleared");
                Some(Command::CancelProgress)
            }

            Action::ImageSelected(path) => {
                self.image_ticket = ImageTicket(self.image_ticket.0 + 1);
                self.image_pending = true;
                self.notice = None;
                debug!(ticket = self.image_ticket.0, path = %path.display(), "image read requested");
                Some(Command::LoadImage {
                    ticket: self.image_ticket,
                    path,
                })
            }

            Action::ImageLoaded { ticket, image } => {
                if ticket != self.image_ticket {
                    debug!(ticket = ticket.0, current = self.image_ticket.0, "stale image read dropped");
                    return None;
                }
                debug!(file = %image.file_name, bytes = image.byte_len, "image attached");
                self.image_pending = false;
                self.image = Some(image);
                None
            }

            Action::ImageFailed { ticket, reason } => {
                if ticket != self.image_ticket {
                    debug!(ticket = ticket.0, current = self.image_ticket.0, "stale image failure dropped");
                    return None;
                }
                warn!(%reason, "image read failed");
                self.image_pending = false;
                self.notice = Some(reason);
                None
            }

            Action::RemoveImage => {
                self.image_ticket = ImageTicket(self.image_ticket.0 + 1);
                self.image_pending = false;
                self.image = None;
                None
            }

            Action::ProgressTick { generation, step } => {
                if generation != self.generation || self.state != VerificationState::Loading {
                    debug!(%generation, current = %self.generation, step, "stale progress tick dropped");
                    return None;
                }
                activate_progress_step(&mut self.steps, step);
                None
            }

            Action::Resolved {
                generation,
                response,
            } => {
                if generation != self.generation || self.state != VerificationState::Loading {
                    debug!(%generation, current = %self.generation, "superseded response dropped");
                    return None;
                }
                info!(
                    %generation,
                    report_len = response.report_text.len(),
                    sources = response.sources.len(),
                    "verification succeeded"
                );
                self.result = Some(response);
                self.state = VerificationState::Success;
                None
            }

            Action::Rejected {
                generation,
                message,
            } => {
                if generation != self.generation || self.state != VerificationState::Loading {
                    debug!(%generation, current = %self.generation, "superseded failure dropped");
                    return None;
                }
                warn!(%generation, %message, "verification failed");
                self.error = Some(message);
                self.state = VerificationState::Error;
                None
            }
        }
    }

    /// The submit transition shared by `Submit` and `Retry`.
    fn submit(&mut self) -> Option<Command> {
        if self.state == VerificationState::Loading {
            debug!(generation = %self.generation, "submit rejected while loading");
            return None;
        }
        if !self.has_input() {
            debug!("submit ignored: no text and no image");
            return None;
        }

        self.generation = self.generation.next();
        self.state = VerificationState::Loading;
        self.result = None;
        self.error = None;
        self.notice = None;
        self.steps = initial_progress_steps();
        activate_progress_step(&mut self.steps, 0);

        let request = VerificationRequest {
            generation: self.generation,
            request_id: RequestId::new(),
            text: self.input_text.clone(),
            image: self.image.clone(),
        };

        info!(
            generation = %request.generation,
            request_id = %request.request_id,
            text_len = request.text.len(),
            has_image = request.image.is_some(),
            "verification submitted"
        );

        Some(Command::Verify {
            request,
            progress: ProgressSchedule {
                generation: self.generation,
                interval: self.step_interval,
            },
        })
    }

    /// Submit and wait for the client in the calling thread.
    ///
    /// Used by hosts with no event loop. Progress ticks are not scheduled.
    /// Returns the state reached, which is unchanged when the submit was a
    /// no-op.
    pub fn run_blocking(&mut self, client: &dyn VerificationClient) -> VerificationState {
        if let Some(Command::Verify { request, .. }) = self.dispatch(Action::Submit) {
            let outcome = execute(client, &request);
            self.dispatch(outcome);
        }
        self.state
    }
}

/// Run `request` against `client` and turn the outcome into the action that
/// reports it back to the orchestrator.
pub fn execute(client: &dyn VerificationClient, request: &VerificationRequest) -> Action {
    match client.verify(request) {
        Ok(response) => Action::Resolved {
            generation: request.generation,
            response,
        },
        Err(e) => Action::Rejected {
            generation: request.generation,
            message: e.user_message(),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
