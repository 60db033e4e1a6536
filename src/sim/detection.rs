//! Detection: does the scan catch the bug on the line it just reached?

use rand::Rng;

use super::state::{GameEvent, GameSession};
use super::win;
use crate::tuning::Tuning;

/// Chance the scan catches the bug at its current concealment
pub fn detection_chance(concealed: bool, tuning: &Tuning) -> f64 {
    if concealed {
        tuning.concealed_detection_chance
    } else {
        tuning.exposed_detection_chance
    }
}

/// Roll detection if the scan sits on the bug's line
///
/// Each scan position is rolled at most once per pass: the guard in
/// `flags.last_evaluated_scan_position` is set before the roll and only
/// cleared when the scan wraps. Returns whether the bug was caught.
pub fn evaluate<R: Rng>(
    session: &mut GameSession,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !session.is_alive() || !session.scan.active {
        return false;
    }
    let line = session.scan.position;
    if line == 0
        || line != session.entity.position.line
        || line == session.flags.last_evaluated_scan_position
    {
        return false;
    }
    session.flags.last_evaluated_scan_position = line;

    let chance = detection_chance(session.entity.concealed, tuning);
    let draw = rng.random::<f64>();
    if draw < chance {
        win::declare_caught(session, line, events)
    } else {
        log::debug!("Scan passed over hidden bug on line {}", line);
        events.push(GameEvent::Survived { line });
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::ConcealmentMap;
    use crate::sim::state::Status;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session_on_scan(concealed: bool) -> GameSession {
        let tuning = Tuning::default();
        let mut flags = [false; 10];
        flags[4] = concealed;
        let mut s = GameSession::new(1, ConcealmentMap::from_flags(&flags), &tuning);
        s.scan.start(0);
        s.scan.position = 5;
        s
    }

    #[test]
    fn test_exposed_bug_is_always_caught() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(10);
        for _ in 0..100 {
            let mut s = session_on_scan(false);
            let mut events = Vec::new();
            assert!(evaluate(&mut s, &tuning, &mut rng, &mut events));
            assert_eq!(s.status, Status::Caught);
            assert!(s.flags.has_lost);
            assert!(!s.scan.active);
        }
    }

    #[test]
    fn test_concealed_caught_rate_near_thirty_percent() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let trials = 10_000;
        let mut caught = 0;
        for _ in 0..trials {
            let mut s = session_on_scan(true);
            assert!(s.entity.concealed);
            if evaluate(&mut s, &tuning, &mut rng, &mut Vec::new()) {
                caught += 1;
            }
        }
        let rate = caught as f64 / trials as f64;
        assert!((rate - 0.3).abs() < 0.03, "caught rate {rate}");
    }

    #[test]
    fn test_evaluate_rolls_once_per_position() {
        // Survive the first roll for sure, then make any later roll fatal
        let mut tuning = Tuning {
            concealed_detection_chance: 0.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(12);
        let mut s = session_on_scan(true);
        let mut events = Vec::new();

        assert!(!evaluate(&mut s, &tuning, &mut rng, &mut events));
        assert_eq!(s.flags.last_evaluated_scan_position, 5);

        tuning.concealed_detection_chance = 1.0;
        assert!(!evaluate(&mut s, &tuning, &mut rng, &mut events));
        assert_eq!(s.status, Status::Alive);
        assert_eq!(events, vec![GameEvent::Survived { line: 5 }]);
    }

    #[test]
    fn test_no_roll_without_coincidence() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let mut s = session_on_scan(false);
        s.scan.position = 4;
        assert!(!evaluate(&mut s, &tuning, &mut rng, &mut Vec::new()));
        assert_eq!(s.flags.last_evaluated_scan_position, 0);

        // Inactive scanner never detects
        s.scan.position = 5;
        s.scan.stop();
        assert!(!evaluate(&mut s, &tuning, &mut rng, &mut Vec::new()));
        assert_eq!(s.status, Status::Alive);
    }

    #[test]
    fn test_terminal_session_not_evaluated() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(14);
        let mut s = session_on_scan(false);
        s.status = Status::Won;
        assert!(!evaluate(&mut s, &tuning, &mut rng, &mut Vec::new()));
        assert_eq!(s.status, Status::Won);
        assert!(!s.flags.has_lost);
    }
}
