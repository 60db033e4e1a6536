//! The bug: position plus the derived concealment flag

use serde::{Deserialize, Serialize};

use super::map::ConcealmentMap;
use super::state::{Direction, GameSession, Position};

/// The controllable entity
///
/// `concealed` is a pure function of `(position, map)`. It is recomputed on
/// every write to either and never read stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState {
    pub position: Position,
    pub concealed: bool,
}

impl EntityState {
    pub fn new(position: Position, map: &ConcealmentMap) -> Self {
        let mut entity = Self {
            position,
            concealed: false,
        };
        entity.teleport(position, map);
        entity
    }

    /// Step one cell; `bound` is the deepest line a down move may reach
    pub fn step(&mut self, direction: Direction, bound: Option<u32>, map: &ConcealmentMap) {
        let Position { mut line, mut column } = self.position;
        match direction {
            Direction::Up => line = line.saturating_sub(1).max(1),
            Direction::Down => {
                line = line.saturating_add(1);
                if let Some(max) = bound {
                    line = line.min(max.max(1));
                }
            }
            Direction::Left => column = column.saturating_sub(1).max(1),
            Direction::Right => column = column.saturating_add(1),
        }
        self.position = Position { line, column };
        self.refresh(map);
    }

    /// Place the bug directly (line and column floored at 1)
    pub fn teleport(&mut self, position: Position, map: &ConcealmentMap) {
        self.position = Position {
            line: position.line.max(1),
            column: position.column.max(1),
        };
        self.refresh(map);
    }

    /// Re-derive `concealed` after the map or position changed
    pub fn refresh(&mut self, map: &ConcealmentMap) {
        self.concealed = map.conceals_at(self.position.line);
    }
}

/// Move the bug one cell, bounded by the map height
///
/// Ignored unless the session is alive. Returns whether a move was applied.
pub fn move_entity(session: &mut GameSession, direction: Direction) -> bool {
    if !session.is_alive() {
        return false;
    }
    let bound = Some(session.map.len()).filter(|&n| n > 0);
    session.entity.step(direction, bound, &session.map);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Status;
    use crate::tuning::Tuning;

    fn map() -> ConcealmentMap {
        ConcealmentMap::from_flags(&[false, true, false, true, false])
    }

    #[test]
    fn test_vertical_clamping() {
        let map = map();
        let mut bug = EntityState::new(Position::new(1, 1), &map);

        bug.step(Direction::Up, Some(5), &map);
        assert_eq!(bug.position.line, 1);

        for _ in 0..10 {
            bug.step(Direction::Down, Some(5), &map);
        }
        assert_eq!(bug.position.line, 5);

        // Unbounded down keeps going
        bug.step(Direction::Down, None, &map);
        assert_eq!(bug.position.line, 6);
        assert!(!bug.concealed);
    }

    #[test]
    fn test_horizontal_moves() {
        let map = map();
        let mut bug = EntityState::new(Position::new(2, 1), &map);

        bug.step(Direction::Left, Some(5), &map);
        assert_eq!(bug.position.column, 1);
        bug.step(Direction::Right, Some(5), &map);
        bug.step(Direction::Right, Some(5), &map);
        assert_eq!(bug.position, Position::new(2, 3));
    }

    #[test]
    fn test_concealment_follows_line() {
        let map = map();
        let mut bug = EntityState::new(Position::new(1, 4), &map);
        assert!(!bug.concealed);

        bug.step(Direction::Down, Some(5), &map);
        assert!(bug.concealed);
        bug.step(Direction::Down, Some(5), &map);
        assert!(!bug.concealed);
        // Horizontal moves keep the line's concealment
        bug.step(Direction::Down, Some(5), &map);
        bug.step(Direction::Right, Some(5), &map);
        assert!(bug.concealed);
    }

    #[test]
    fn test_teleport_floors_line() {
        let map = map();
        let mut bug = EntityState::new(Position::new(3, 3), &map);
        bug.teleport(Position::new(0, 0), &map);
        assert_eq!(bug.position, Position::new(1, 1));
        bug.teleport(Position::new(4, 9), &map);
        assert!(bug.concealed);
    }

    #[test]
    fn test_move_ignored_when_not_alive() {
        let tuning = Tuning::default();
        let mut session = GameSession::new(1, map(), &tuning);
        let start = session.entity.position;

        assert!(move_entity(&mut session, Direction::Up));
        assert_ne!(session.entity.position, start);

        session.status = Status::Caught;
        let frozen = session.entity.position;
        assert!(!move_entity(&mut session, Direction::Down));
        assert_eq!(session.entity.position, frozen);
    }
}
