//! Compiler scan: the sweeping scanner and its per-cycle speed-up
//!
//! Position 0 means the scanner has not started. Once sweeping it visits
//! lines `1..=N` in order and wraps back to 1, counting a survived cycle and
//! stepping a little faster each time.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameSession};
use super::win;
use crate::tuning::Tuning;

/// Scanner sweep state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanState {
    /// Current line (0 = inactive, 1..=N = sweeping)
    pub position: u32,
    pub active: bool,
    /// Current time per step
    pub step_ms: u64,
    pub base_step_ms: u64,
    pub step_decrement_ms: u64,
    pub min_step_ms: u64,
    /// Timestamp of the last step (or of activation)
    pub last_step_at: u64,
}

impl ScanState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            position: 0,
            active: false,
            step_ms: tuning.base_step_ms.max(tuning.min_step_ms),
            base_step_ms: tuning.base_step_ms,
            step_decrement_ms: tuning.step_decrement_ms,
            min_step_ms: tuning.min_step_ms,
            last_step_at: 0,
        }
    }

    /// Inactive -> sweeping from line 1
    pub fn start(&mut self, now: u64) {
        self.position = 1;
        self.active = true;
        self.last_step_at = now;
    }

    /// Pause in place; position is kept for [`ScanState::resume`]
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Continue a paused sweep from the retained position
    pub fn resume(&mut self, now: u64) {
        if self.position == 0 {
            self.start(now);
            return;
        }
        self.active = true;
        self.last_step_at = now;
    }

    /// Back to the inactive defaults
    pub fn reset(&mut self) {
        self.position = 0;
        self.active = false;
        self.step_ms = self.base_step_ms.max(self.min_step_ms);
        self.last_step_at = 0;
    }

    /// Apply one cycle's speed-up, floored at `min_step_ms`
    pub fn speed_up(&mut self) {
        self.step_ms = self
            .step_ms
            .saturating_sub(self.step_decrement_ms)
            .max(self.min_step_ms);
    }

}

/// Activate the scanner for a live session with a non-empty map
///
/// Only a scanner that has never started can be activated. A paused sweep
/// (position > 0) is left for [`ScanState::resume`].
pub fn activate(session: &mut GameSession, now: u64) -> bool {
    let scan = &session.scan;
    if !session.is_alive() || scan.active || scan.position != 0 || session.map.is_empty() {
        return false;
    }
    session.scan.start(now);
    log::info!("Compiler scan activated (step {}ms)", session.scan.step_ms);
    true
}

/// Step the scanner if its interval has elapsed
///
/// Returns whether the scan position changed. On wrap-around the cycle
/// counter, speed-up and idempotency guard are updated and the win check
/// runs before this returns, so it observes the new cycle count.
pub fn advance(session: &mut GameSession, now: u64, events: &mut Vec<GameEvent>) -> bool {
    if !session.scan.active || !session.is_alive() {
        return false;
    }
    let total = session.map.len();
    if total == 0 {
        return false;
    }
    if now.saturating_sub(session.scan.last_step_at) < session.scan.step_ms {
        return false;
    }

    let scan = &mut session.scan;
    scan.last_step_at = now;
    if scan.position + 1 > total {
        scan.position = 1;
        scan.speed_up();
        session.counters.cycles_survived += 1;
        session.flags.last_evaluated_scan_position = 0;

        let cycles = session.counters.cycles_survived;
        let step_ms = session.scan.step_ms;
        log::debug!("Scan cycle {} complete, step now {}ms", cycles, step_ms);
        events.push(GameEvent::CycleCompleted { cycles, step_ms });
        win::check(session, events);
    } else {
        scan.position += 1;
    }

    log::trace!("Scan at line {}", session.scan.position);
    events.push(GameEvent::ScanMoved {
        line: session.scan.position,
    });
    true
}
