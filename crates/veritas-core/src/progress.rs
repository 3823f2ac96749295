//! The cosmetic progress pipeline.
//!
//! The five stages shown while a request is in flight are a UX illusion: they
//! advance on a fixed timer and say nothing about how far the external call
//! has actually got. If the call finishes first, the remaining stages are
//! simply abandoned where they stand. Nothing here carries a correctness
//! contract beyond "never touch a newer request's display".
//!
//! `ProgressSchedule` describes the ticks for one generation.
//! `ProgressTimers` is the host-side queue that fires them. Starting a new
//! schedule replaces the queue, which is how stale ticks are cancelled; the
//! orchestrator's generation check catches any that slip through.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use veritas_contracts::{request::RequestGeneration, state::PROGRESS_STAGES};

use crate::orchestrator::Action;

/// Timed stage advances for one request generation.
///
/// Stage 0 is activated synchronously on submit. Stage `n` (n ≥ 1) fires
/// `n × interval` after the submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSchedule {
    pub generation: RequestGeneration,
    pub interval: Duration,
}

impl ProgressSchedule {
    /// The (delay, action) pairs for stages 1 through 4.
    pub fn ticks(&self) -> Vec<(Duration, Action)> {
        (1..PROGRESS_STAGES.len())
            .map(|step| {
                let delay = self.interval * step as u32;
                (
                    delay,
                    Action::ProgressTick {
                        generation: self.generation,
                        step,
                    },
                )
            })
            .collect()
    }
}

/// A queue of pending progress ticks, ordered by due time.
#[derive(Debug, Default)]
pub struct ProgressTimers {
    pending: VecDeque<(Instant, Action)>,
}

impl ProgressTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every pending tick with the ticks of `schedule`, measured
    /// from `now`.
    pub fn start(&mut self, schedule: &ProgressSchedule, now: Instant) {
        self.pending = schedule
            .ticks()
            .into_iter()
            .map(|(delay, action)| (now + delay, action))
            .collect();
    }

    /// Drop every pending tick.
    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// How long until the earliest pending tick is due, or `None` when the
    /// queue is empty. Zero when a tick is already overdue.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending
            .front()
            .map(|(due, _)| due.saturating_duration_since(now))
    }

    /// Remove and return every tick due at or before `now`, in order.
    pub fn take_due(&mut self, now: Instant) -> Vec<Action> {
        let mut due = Vec::new();
        while let Some((at, _)) = self.pending.front() {
            if *at > now {
                break;
            }
            if let Some((_, action)) = self.pending.pop_front() {
                due.push(action);
            }
        }
        due
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
