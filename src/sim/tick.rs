//! Game controller and host-driven tick
//!
//! The host calls [`Game::tick`] once per frame with its monotonic clock.
//! Each tick runs, in order:
//!   1. Due one-shot timers (scanner activation/resume, banner clear)
//!   2. The one-second survival counter + win check
//!   3. The five-second random-event check
//!   4. Scanner step, then detection when the scan moved

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::detection;
use super::entity;
use super::events;
use super::map::ConcealmentMap;
use super::scan;
use super::state::{Direction, GameEvent, GameSession, Snapshot, Status};
use super::timers::{Scheduler, Timer, TimerKind};
use super::win;
use crate::leaderboard::SessionRecord;
use crate::tuning::Tuning;

/// Owns the live session, the RNG and every pending timer
#[derive(Debug, Clone)]
pub struct Game {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    session: GameSession,
    timers: Scheduler,
    /// Whether `start` has been called at least once
    started: bool,
    next_counter_at: Option<u64>,
    next_event_check_at: Option<u64>,
}

impl Game {
    /// Create an idle game; nothing runs until [`Game::start`]
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let map = ConcealmentMap::generate(&mut rng, tuning.concealment_chance);
        let session = GameSession::new(0, map, &tuning);
        Self {
            tuning,
            seed,
            rng,
            session,
            timers: Scheduler::new(),
            started: false,
            next_counter_at: None,
            next_event_check_at: None,
        }
    }

    /// Create a game with a random seed
    pub fn with_random_seed(tuning: Tuning) -> Self {
        let seed = rand::rng().random();
        Self::new(tuning, seed)
    }

    /// Begin the first session
    pub fn start(&mut self, now: u64) {
        self.reset(now);
    }

    /// Throw the current session away and begin a fresh one
    ///
    /// Every pending timer is cancelled, and the new session id makes any
    /// timer that still reaches [`Game::fire`] from the old session inert.
    pub fn reset(&mut self, now: u64) {
        let id = self.session.id + 1;
        let map = ConcealmentMap::generate(&mut self.rng, self.tuning.concealment_chance);
        self.session = GameSession::new(id, map, &self.tuning);
        self.timers.cancel_all();
        self.timers
            .schedule(TimerKind::ActivateScanner, now + self.tuning.grace_ms, id);
        self.next_counter_at = Some(now + self.tuning.counter_interval_ms);
        self.next_event_check_at = Some(now + self.tuning.event_check_interval_ms);
        self.started = true;
        log::info!(
            "Session {} started: {} lines, {} hiding spots, scan in {}ms",
            id,
            self.session.map.len(),
            self.session.map.concealing_count(),
            self.tuning.grace_ms
        );
    }

    /// Advance the game to `now`
    pub fn tick(&mut self, now: u64) -> Vec<GameEvent> {
        let mut out = Vec::new();
        if !self.started {
            return out;
        }

        for timer in self.timers.take_due(now) {
            self.dispatch(timer, now, &mut out);
        }

        while let Some(at) = self.next_counter_at.filter(|&at| now >= at) {
            if !self.session.is_alive() {
                self.next_counter_at = None;
                break;
            }
            self.session.counters.elapsed_seconds += 1;
            win::check(&mut self.session, &mut out);
            self.next_counter_at = Some(at + self.tuning.counter_interval_ms);
        }

        while let Some(at) = self.next_event_check_at.filter(|&at| now >= at) {
            if !self.session.is_alive() {
                self.next_event_check_at = None;
                break;
            }
            events::maybe_trigger(
                &mut self.session,
                &self.tuning,
                &mut self.rng,
                &mut self.timers,
                at,
                &mut out,
            );
            self.next_event_check_at = Some(at + self.tuning.event_check_interval_ms);
        }

        if scan::advance(&mut self.session, now, &mut out) {
            detection::evaluate(&mut self.session, &self.tuning, &mut self.rng, &mut out);
        }

        out
    }

    /// Deliver a timer from outside the internal queue
    ///
    /// Timers from a superseded session are discarded.
    pub fn fire(&mut self, timer: Timer, now: u64) -> Vec<GameEvent> {
        let mut out = Vec::new();
        self.dispatch(timer, now, &mut out);
        out
    }

    fn dispatch(&mut self, timer: Timer, now: u64, out: &mut Vec<GameEvent>) {
        if timer.session != self.session.id {
            log::debug!(
                "Discarding stale {:?} from session {} (live: {})",
                timer.kind,
                timer.session,
                self.session.id
            );
            return;
        }
        match timer.kind {
            TimerKind::ActivateScanner => {
                if scan::activate(&mut self.session, now) {
                    out.push(GameEvent::ScannerActivated);
                    // The scan lands on line 1 at activation
                    detection::evaluate(&mut self.session, &self.tuning, &mut self.rng, out);
                }
            }
            TimerKind::ResumeScanner => {
                events::resume_scanner(&mut self.session, now, out);
            }
            TimerKind::ClearEvent => {
                events::clear_display(&mut self.session, now, out);
            }
        }
    }

    /// Move the bug; ignored once the session is over
    pub fn apply_directional_input(&mut self, direction: Direction) -> bool {
        entity::move_entity(&mut self.session, direction)
    }

    /// Re-roll the code on demand (a player-triggered `SyntaxStorm`)
    pub fn regenerate_map(&mut self) -> Vec<GameEvent> {
        if !self.session.is_alive() {
            return Vec::new();
        }
        let map = ConcealmentMap::generate(&mut self.rng, self.tuning.concealment_chance);
        self.session.replace_map(map);
        vec![GameEvent::MapRegenerated]
    }

    /// Remaining grace time before the scanner switches on
    pub fn activation_countdown(&self, now: u64) -> Option<u64> {
        self.timers
            .next_due(TimerKind::ActivateScanner, self.session.id)
            .map(|due| due.saturating_sub(now))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.session)
    }

    /// Result row for the leaderboard, once the session is over
    pub fn session_record(&self, player: &str) -> Option<SessionRecord> {
        if !self.session.status.is_terminal() {
            return None;
        }
        Some(SessionRecord {
            player: player.to_string(),
            seconds_survived: self.session.counters.elapsed_seconds,
            cycles_survived: self.session.counters.cycles_survived,
            status: self.session.status,
        })
    }

    pub fn status(&self) -> Status {
        self.session.status
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct session access for hosts and tests
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn pending_timers(&self) -> &[Timer] {
        self.timers.pending()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}
