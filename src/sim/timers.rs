//! One-shot delayed callbacks tagged with their session
//!
//! Every timer records the id of the session that scheduled it. The
//! controller discards any timer whose id no longer matches the live
//! session, so a reset can never be undone by a late callback.

use serde::{Deserialize, Serialize};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the start/reset grace period
    ActivateScanner,
    /// End of a `DebugFreeze`
    ResumeScanner,
    /// Hide the event banner
    ClearEvent,
}

/// A pending callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub kind: TimerKind,
    pub due_at: u64,
    /// Session that scheduled it
    pub session: u64,
}

/// Pending timers in scheduling order
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TimerKind, due_at: u64, session: u64) {
        self.pending.push(Timer {
            kind,
            due_at,
            session,
        });
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Remove and return timers due at or before `now`, earliest first
    ///
    /// Timers due at the same instant keep their scheduling order.
    pub fn take_due(&mut self, now: u64) -> Vec<Timer> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_at <= now);
        self.pending = pending;
        due.sort_by_key(|t| t.due_at);
        due
    }

    /// Earliest due time of a kind scheduled by `session`
    pub fn next_due(&self, kind: TimerKind, session: u64) -> Option<u64> {
        self.pending
            .iter()
            .filter(|t| t.kind == kind && t.session == session)
            .map(|t| t.due_at)
            .min()
    }

    pub fn pending(&self) -> &[Timer] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
