//! Game session and core simulation types
//!
//! A [`GameSession`] is the single mutable record for one play-through.
//! Every engine component takes it as an explicit `&mut` parameter and
//! reset replaces it wholesale.

use serde::{Deserialize, Serialize};

use super::entity::EntityState;
use super::events::{EventKind, EventState};
use super::map::ConcealmentMap;
use super::scan::ScanState;
use crate::tuning::Tuning;

/// A cell on the editor grid. Only `line` matters to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number
    pub line: u32,
    /// 1-based column (cosmetic)
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Discrete movement command from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Alive,
    /// Detected by the scan
    Caught,
    /// Reached a victory threshold
    Won,
}

impl Status {
    pub fn is_alive(self) -> bool {
        self == Status::Alive
    }

    /// Caught and Won are only left through an explicit reset
    pub fn is_terminal(self) -> bool {
        !self.is_alive()
    }
}

/// Which threshold produced the win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    Cycles,
    Time,
    /// Both thresholds held at the same check
    Both,
}

/// Victory thresholds, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinConditions {
    pub target_cycles: u32,
    pub target_seconds: u32,
}

/// Survival counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub elapsed_seconds: u32,
    pub cycles_survived: u32,
}

/// Terminal flags plus the detection idempotency guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameFlags {
    pub has_won: bool,
    pub has_lost: bool,
    /// Scan position already rolled for this pass (0 = none)
    pub last_evaluated_scan_position: u32,
}

/// Notifications emitted for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScannerActivated,
    ScanMoved { line: u32 },
    CycleCompleted { cycles: u32, step_ms: u64 },
    /// Detection roll passed while the scan sat on the bug
    Survived { line: u32 },
    Caught { line: u32 },
    Won { reason: WinReason },
    EventTriggered { kind: EventKind },
    EventCleared,
    ScannerResumed,
    MapRegenerated,
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Token carried by every timer scheduled for this session
    pub id: u64,
    pub map: ConcealmentMap,
    pub entity: EntityState,
    pub scan: ScanState,
    pub flags: GameFlags,
    pub counters: Counters,
    pub conditions: WinConditions,
    pub status: Status,
    pub win_reason: Option<WinReason>,
    pub events: EventState,
}

impl GameSession {
    /// Fresh session: bug at the spawn point, counters zeroed, scanner inactive
    pub fn new(id: u64, map: ConcealmentMap, tuning: &Tuning) -> Self {
        let spawn = Position::new(tuning.start_line, tuning.start_column);
        let entity = EntityState::new(spawn, &map);
        Self {
            id,
            map,
            entity,
            scan: ScanState::new(tuning),
            flags: GameFlags::default(),
            counters: Counters::default(),
            conditions: WinConditions {
                target_cycles: tuning.target_cycles,
                target_seconds: tuning.target_seconds,
            },
            status: Status::Alive,
            win_reason: None,
            events: EventState::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    /// Swap in a new map and re-derive the bug's concealment
    pub fn replace_map(&mut self, map: ConcealmentMap) {
        self.map = map;
        self.entity.refresh(&self.map);
    }
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub session: u64,
    pub position: Position,
    pub concealed: bool,
    pub scan_line: u32,
    pub scan_active: bool,
    pub step_ms: u64,
    pub counters: Counters,
    pub status: Status,
    pub conditions: WinConditions,
    pub win_reason: Option<WinReason>,
    pub active_event: Option<super::events::ActiveEvent>,
    pub total_lines: u32,
}

impl Snapshot {
    pub fn of(session: &GameSession) -> Self {
        Self {
            session: session.id,
            position: session.entity.position,
            concealed: session.entity.concealed,
            scan_line: session.scan.position,
            scan_active: session.scan.active,
            step_ms: session.scan.step_ms,
            counters: session.counters,
            status: session.status,
            conditions: session.conditions,
            win_reason: session.win_reason,
            active_event: session.events.active,
            total_lines: session.map.len(),
        }
    }
}
