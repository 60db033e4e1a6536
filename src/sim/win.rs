//! Win/loss evaluation
//!
//! The only place that moves a session into a terminal status.

use super::state::{GameEvent, GameSession, Status, WinReason};

/// Check the victory thresholds and transition to `Won` if either is met
///
/// Runs after each completed scan cycle and each elapsed-second tick.
/// Both thresholds holding at once still produce a single transition.
pub fn check(session: &mut GameSession, events: &mut Vec<GameEvent>) -> Option<WinReason> {
    if !session.is_alive() || session.flags.has_won || session.flags.has_lost {
        return None;
    }

    let by_cycles = session.counters.cycles_survived >= session.conditions.target_cycles;
    let by_time = session.counters.elapsed_seconds >= session.conditions.target_seconds;
    let reason = match (by_cycles, by_time) {
        (true, true) => WinReason::Both,
        (true, false) => WinReason::Cycles,
        (false, true) => WinReason::Time,
        (false, false) => return None,
    };

    session.status = Status::Won;
    session.flags.has_won = true;
    session.win_reason = Some(reason);
    session.scan.stop();
    log::info!(
        "Bug escaped! {:?} after {}s and {} scans",
        reason,
        session.counters.elapsed_seconds,
        session.counters.cycles_survived
    );
    events.push(GameEvent::Won { reason });
    Some(reason)
}

/// Move the session to `Caught` and halt the scanner
pub fn declare_caught(session: &mut GameSession, line: u32, events: &mut Vec<GameEvent>) -> bool {
    if !session.is_alive() || session.flags.has_lost {
        return false;
    }
    session.status = Status::Caught;
    session.flags.has_lost = true;
    session.scan.stop();
    log::info!(
        "Bug caught on line {} after {}s",
        line,
        session.counters.elapsed_seconds
    );
    events.push(GameEvent::Caught { line });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::ConcealmentMap;
    use crate::tuning::Tuning;

    fn session() -> GameSession {
        let tuning = Tuning {
            target_cycles: 5,
            target_seconds: 60,
            ..Default::default()
        };
        GameSession::new(1, ConcealmentMap::from_flags(&[false; 21]), &tuning)
    }

    #[test]
    fn test_no_win_below_thresholds() {
        let mut s = session();
        let mut events = Vec::new();
        s.counters.cycles_survived = 4;
        s.counters.elapsed_seconds = 59;
        assert_eq!(check(&mut s, &mut events), None);
        assert_eq!(s.status, Status::Alive);
        assert!(events.is_empty());
    }

    #[test]
    fn test_win_by_either_threshold() {
        let mut s = session();
        let mut events = Vec::new();
        s.counters.cycles_survived = 5;
        assert_eq!(check(&mut s, &mut events), Some(WinReason::Cycles));
        assert_eq!(s.status, Status::Won);

        let mut s = session();
        s.counters.elapsed_seconds = 60;
        assert_eq!(check(&mut s, &mut events), Some(WinReason::Time));
    }

    #[test]
    fn test_simultaneous_thresholds_win_once() {
        let mut s = session();
        let mut events = Vec::new();
        s.counters.cycles_survived = 5;
        s.counters.elapsed_seconds = 60;

        assert_eq!(check(&mut s, &mut events), Some(WinReason::Both));
        assert_eq!(check(&mut s, &mut events), None);
        assert_eq!(check(&mut s, &mut events), None);
        assert_eq!(events, vec![GameEvent::Won { reason: WinReason::Both }]);
        assert!(s.flags.has_won);
        assert_eq!(s.win_reason, Some(WinReason::Both));
    }

    #[test]
    fn test_caught_blocks_win() {
        let mut s = session();
        let mut events = Vec::new();
        assert!(declare_caught(&mut s, 5, &mut events));
        assert!(!declare_caught(&mut s, 5, &mut events));
        s.counters.cycles_survived = 10;
        assert_eq!(check(&mut s, &mut events), None);
        assert_eq!(s.status, Status::Caught);
        assert!(s.flags.has_lost);
        assert_eq!(events, vec![GameEvent::Caught { line: 5 }]);
    }
}
