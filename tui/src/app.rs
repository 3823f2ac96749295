//! Host-side application state for the TUI.
//!
//! `App` owns the `Orchestrator` and carries out the commands it returns:
//! verification calls and image reads run on short-lived worker threads that
//! post their outcome back over a channel, and progress ticks sit in a
//! `ProgressTimers` queue. The event loop calls `pump()` to feed both into
//! the reducer.

use std::{
    path::PathBuf,
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use veritas_client::image::load_image;
use veritas_config::AppConfig;
use veritas_contracts::state::VerificationState;
use veritas_core::{
    orchestrator::execute, traits::VerificationClient, Action, Command, Orchestrator,
    ProgressTimers,
};
use veritas_report::{render_report, render_sources, ReportView, SourceEntry};

/// What keystrokes currently edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Typing into the claim text.
    Editing,
    /// Typing a path for the image prompt.
    ImagePath(String),
}

/// The report and source list for the current result, rendered once.
#[derive(Debug, Clone)]
pub struct RenderedResult {
    pub report: ReportView,
    pub sources: Vec<SourceEntry>,
}

pub struct App {
    orchestrator: Orchestrator,
    client: Arc<dyn VerificationClient>,
    timers: ProgressTimers,
    tx: Sender<Action>,
    rx: Receiver<Action>,
    favicon_endpoint: String,
    rendered: Option<RenderedResult>,
    pub mode: InputMode,
    /// Vertical scroll offset of the output panel.
    pub scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: Arc<dyn VerificationClient>, config: &AppConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            orchestrator: Orchestrator::new(config.step_interval()),
            client,
            timers: ProgressTimers::new(),
            tx,
            rx,
            favicon_endpoint: config.ui.favicon_endpoint.clone(),
            rendered: None,
            mode: InputMode::Editing,
            scroll: 0,
            should_quit: false,
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn rendered(&self) -> Option<&RenderedResult> {
        self.rendered.as_ref()
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    /// Feed `action` to the orchestrator and run whatever it asks for.
    pub fn dispatch(&mut self, action: Action) {
        if let Some(command) = self.orchestrator.dispatch(action) {
            self.run_command(command);
        }
        if self.orchestrator.state() != VerificationState::Loading {
            self.timers.cancel();
        }
        self.refresh_rendered();
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Verify { request, progress } => {
                self.timers.start(&progress, Instant::now());
                self.scroll = 0;
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let outcome = execute(client.as_ref(), &request);
                    if tx.send(outcome).is_err() {
                        debug!(generation = %request.generation, "event loop gone, outcome dropped");
                    }
                });
            }
            Command::LoadImage { ticket, path } => {
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let action = match load_image(&path) {
                        Ok(image) => Action::ImageLoaded { ticket, image },
                        Err(e) => Action::ImageFailed {
                            ticket,
                            reason: e.to_string(),
                        },
                    };
                    if tx.send(action).is_err() {
                        debug!(ticket = ticket.0, "event loop gone, image read dropped");
                    }
                });
            }
            Command::CancelProgress => self.timers.cancel(),
        }
    }

    fn refresh_rendered(&mut self) {
        match (self.orchestrator.result(), &self.rendered) {
            (Some(result), None) => {
                self.rendered = Some(RenderedResult {
                    report: render_report(&result.report_text),
                    sources: render_sources(&result.sources, &self.favicon_endpoint),
                });
            }
            (None, Some(_)) => self.rendered = None,
            _ => {}
        }
    }

    /// Apply every worker outcome and progress tick that is ready at `now`.
    pub fn pump(&mut self, now: Instant) {
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
        }
        for tick in self.timers.take_due(now) {
            self.dispatch(tick);
        }
    }

    /// Block up to `timeout` for one worker outcome, then `pump()`.
    pub fn pump_blocking(&mut self, timeout: Duration) {
        if let Ok(action) = self.rx.recv_timeout(timeout) {
            self.dispatch(action);
        }
        self.pump(Instant::now());
    }

    /// How long the event loop may sleep before something is due.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        self.timers
            .time_until_next(now)
            .map_or(idle, |due| due.min(idle))
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if let InputMode::ImagePath(path) = &mut self.mode {
            match key.code {
                KeyCode::Esc => self.mode = InputMode::Editing,
                KeyCode::Enter => {
                    let selected = path.trim().to_string();
                    self.mode = InputMode::Editing;
                    if !selected.is_empty() {
                        self.dispatch(Action::ImageSelected(PathBuf::from(selected)));
                    }
                }
                KeyCode::Backspace => {
                    path.pop();
                }
                KeyCode::Char(c) if !ctrl => path.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(5) => self.dispatch(Action::Submit),
            KeyCode::Char('r') if ctrl => self.dispatch(Action::Submit),
            KeyCode::Char('t') if ctrl => self.dispatch(Action::Retry),
            KeyCode::Char('l') if ctrl => {
                self.scroll = 0;
                self.dispatch(Action::Clear);
            }
            KeyCode::Char('o') if ctrl => self.mode = InputMode::ImagePath(String::new()),
            KeyCode::Char('x') if ctrl => self.dispatch(Action::RemoveImage),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(5),
            KeyCode::Enter => self.edit(|text| text.push('\n')),
            KeyCode::Backspace => self.edit(|text| {
                text.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit(|text| text.push(c)),
            other => debug!(?other, "unbound key"),
        }
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) {
        if self.orchestrator.state() == VerificationState::Loading {
            warn!("input is locked while a verification is running");
            return;
        }
        let mut text = self.orchestrator.input_text().to_string();
        change(&mut text);
        self.dispatch(Action::EditText(text));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
