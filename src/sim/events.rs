//! Random events that shake up a running session
//!
//! A coarse timer asks [`maybe_trigger`] every few seconds. Outside the
//! cooldown window a roll may pick one of three events:
//! - `SyntaxStorm`: regenerate the whole concealment map
//! - `CodeCleanup`: fix a share of the current errors
//! - `DebugFreeze`: pause the scanner for a few seconds

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::map::ConcealmentMap;
use super::state::{GameEvent, GameSession};
use super::timers::{Scheduler, TimerKind};
use crate::tuning::Tuning;

/// Event kinds, picked uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    SyntaxStorm,
    CodeCleanup,
    DebugFreeze,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::SyntaxStorm,
        EventKind::CodeCleanup,
        EventKind::DebugFreeze,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::SyntaxStorm => "Syntax Storm",
            EventKind::CodeCleanup => "Code Cleanup",
            EventKind::DebugFreeze => "Debug Freeze",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EventKind::SyntaxStorm => "The code was rewritten. Errors moved!",
            EventKind::CodeCleanup => "A linter pass fixed some errors. Fewer places to hide!",
            EventKind::DebugFreeze => "A breakpoint paused the compiler scan!",
        }
    }
}

/// Event currently shown on the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub kind: EventKind,
    /// When the banner clears
    pub expires_at: Option<u64>,
}

/// Per-session event bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventState {
    pub active: Option<ActiveEvent>,
    /// Time of the last triggered event (cooldown anchor)
    pub last_event_at: Option<u64>,
}

impl EventState {
    /// Whether the cooldown has run out at `now`
    pub fn off_cooldown(&self, now: u64, cooldown_ms: u64) -> bool {
        self.last_event_at
            .is_none_or(|at| now.saturating_sub(at) >= cooldown_ms)
    }
}

/// Possibly trigger a random event
///
/// The cooldown anchor only moves when an event is actually selected.
pub fn maybe_trigger<R: Rng>(
    session: &mut GameSession,
    tuning: &Tuning,
    rng: &mut R,
    timers: &mut Scheduler,
    now: u64,
    events: &mut Vec<GameEvent>,
) -> Option<EventKind> {
    if !session.is_alive() || !session.events.off_cooldown(now, tuning.event_cooldown_ms) {
        return None;
    }
    if rng.random::<f64>() >= tuning.event_chance {
        return None;
    }
    let kind = EventKind::ALL[rng.random_range(0..EventKind::ALL.len())];
    apply(session, kind, tuning, rng, timers, now);
    events.push(GameEvent::EventTriggered { kind });
    Some(kind)
}

/// Apply an event's effect and show it on the banner
pub fn apply<R: Rng>(
    session: &mut GameSession,
    kind: EventKind,
    tuning: &Tuning,
    rng: &mut R,
    timers: &mut Scheduler,
    now: u64,
) {
    session.events.last_event_at = Some(now);
    log::info!("Random event: {}", kind.name());

    match kind {
        EventKind::SyntaxStorm => {
            session.replace_map(ConcealmentMap::generate(rng, tuning.concealment_chance));
        }
        EventKind::CodeCleanup => {
            let cleared = session
                .map
                .reduce_concealment(rng, tuning.cleanup_clear_chance);
            session.entity.refresh(&session.map);
            log::debug!("Code cleanup fixed {} lines", cleared);
        }
        EventKind::DebugFreeze => {
            if session.scan.active {
                session.scan.stop();
                timers.schedule(TimerKind::ResumeScanner, now + tuning.freeze_ms, session.id);
            }
        }
    }

    let expires_at = now + tuning.event_display_ms;
    session.events.active = Some(ActiveEvent {
        kind,
        expires_at: Some(expires_at),
    });
    timers.schedule(TimerKind::ClearEvent, expires_at, session.id);
}

/// Resume a frozen scanner if the session is still alive
pub fn resume_scanner(session: &mut GameSession, now: u64, events: &mut Vec<GameEvent>) -> bool {
    if !session.is_alive() || session.scan.active || session.scan.position == 0 {
        return false;
    }
    session.scan.resume(now);
    log::info!("Compiler scan resumed at line {}", session.scan.position);
    events.push(GameEvent::ScannerResumed);
    true
}

/// Hide the banner once its display time is over
pub fn clear_display(session: &mut GameSession, now: u64, events: &mut Vec<GameEvent>) -> bool {
    match session.events.active {
        Some(ActiveEvent {
            expires_at: Some(at),
            ..
        }) if now >= at => {
            session.events.active = None;
            events.push(GameEvent::EventCleared);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Status;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn tuning(event_chance: f64) -> Tuning {
        Tuning {
            event_chance,
            ..Default::default()
        }
    }

    fn session() -> GameSession {
        let map = ConcealmentMap::from_flags(&[true; 21]);
        let mut s = GameSession::new(4, map, &Tuning::default());
        s.scan.start(0);
        s
    }

    #[test]
    fn test_never_triggers_at_zero_chance() {
        let mut rng = Pcg32::seed_from_u64(20);
        let mut timers = Scheduler::new();
        let mut s = session();
        for i in 0..500 {
            let t = tuning(0.0);
            let fired = maybe_trigger(&mut s, &t, &mut rng, &mut timers, i * 5000, &mut Vec::new());
            assert_eq!(fired, None);
        }
        assert_eq!(s.events.last_event_at, None);
    }

    #[test]
    fn test_cooldown_blocks_second_event() {
        let mut rng = Pcg32::seed_from_u64(21);
        let mut timers = Scheduler::new();
        let mut s = session();
        let t = tuning(1.0);

        let mut out = Vec::new();
        assert!(maybe_trigger(&mut s, &t, &mut rng, &mut timers, 5000, &mut out).is_some());
        assert_eq!(s.events.last_event_at, Some(5000));
        assert!(maybe_trigger(&mut s, &t, &mut rng, &mut timers, 20_000, &mut out).is_none());
        assert_eq!(s.events.last_event_at, Some(5000));
        assert!(maybe_trigger(&mut s, &t, &mut rng, &mut timers, 25_000, &mut out).is_some());
        assert_eq!(s.events.last_event_at, Some(25_000));
    }

    #[test]
    fn test_no_events_after_game_over() {
        let mut rng = Pcg32::seed_from_u64(22);
        let mut timers = Scheduler::new();
        let mut s = session();
        s.status = Status::Caught;
        let t = tuning(1.0);
        assert!(maybe_trigger(&mut s, &t, &mut rng, &mut timers, 0, &mut Vec::new()).is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_all_kinds_get_picked() {
        let mut rng = Pcg32::seed_from_u64(23);
        let mut timers = Scheduler::new();
        let t = Tuning {
            event_chance: 1.0,
            event_cooldown_ms: 0,
            ..Default::default()
        };
        let mut seen = Vec::new();
        for i in 0..100 {
            let mut s = session();
            let mut out = Vec::new();
            if let Some(kind) = maybe_trigger(&mut s, &t, &mut rng, &mut timers, i, &mut out) {
                if !seen.contains(&kind) {
                    seen.push(kind);
                }
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_code_cleanup_only_removes_cover() {
        let mut rng = Pcg32::seed_from_u64(24);
        let mut timers = Scheduler::new();
        let t = Tuning {
            cleanup_clear_chance: 1.0,
            ..Default::default()
        };
        let mut s = session();
        assert!(s.entity.concealed);

        apply(&mut s, EventKind::CodeCleanup, &t, &mut rng, &mut timers, 1000);
        assert_eq!(s.map.concealing_count(), 0);
        assert!(!s.entity.concealed);
        assert_eq!(s.events.active.map(|e| e.kind), Some(EventKind::CodeCleanup));
    }

    #[test]
    fn test_syntax_storm_rerolls_map() {
        let mut rng = Pcg32::seed_from_u64(25);
        let mut timers = Scheduler::new();
        let t = Tuning {
            concealment_chance: 0.0,
            ..Default::default()
        };
        let mut s = session();
        apply(&mut s, EventKind::SyntaxStorm, &t, &mut rng, &mut timers, 0);
        assert_eq!(s.map.len(), 21);
        assert_eq!(s.map.concealing_count(), 0);
        assert!(!s.entity.concealed);
    }

    #[test]
    fn test_debug_freeze_pauses_and_schedules_resume() {
        let mut rng = Pcg32::seed_from_u64(26);
        let mut timers = Scheduler::new();
        let t = Tuning::default();
        let mut s = session();
        s.scan.position = 7;

        apply(&mut s, EventKind::DebugFreeze, &t, &mut rng, &mut timers, 10_000);
        assert!(!s.scan.active);
        assert_eq!(s.scan.position, 7);
        assert_eq!(timers.next_due(TimerKind::ResumeScanner, s.id), Some(13_000));
        assert_eq!(timers.next_due(TimerKind::ClearEvent, s.id), Some(14_000));

        let mut events = Vec::new();
        assert!(resume_scanner(&mut s, 13_000, &mut events));
        assert!(s.scan.active);
        assert_eq!(s.scan.position, 7);
        assert_eq!(s.scan.last_step_at, 13_000);
        assert_eq!(events, vec![GameEvent::ScannerResumed]);
    }

    #[test]
    fn test_resume_skipped_when_caught() {
        let mut s = session();
        s.scan.stop();
        s.status = Status::Caught;
        assert!(!resume_scanner(&mut s, 0, &mut Vec::new()));
        assert!(!s.scan.active);
    }

    #[test]
    fn test_banner_clears_after_display_time() {
        let mut rng = Pcg32::seed_from_u64(27);
        let mut timers = Scheduler::new();
        let mut s = session();
        apply(&mut s, EventKind::CodeCleanup, &Tuning::default(), &mut rng, &mut timers, 0);

        let mut events = Vec::new();
        assert!(!clear_display(&mut s, 3999, &mut events));
        assert!(s.events.active.is_some());
        assert!(clear_display(&mut s, 4000, &mut events));
        assert!(s.events.active.is_none());
        assert_eq!(events, vec![GameEvent::EventCleared]);
    }
}
