//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes from the host as milliseconds, never from a wall clock
//! - Seeded RNG only
//! - One `GameSession` passed explicitly to every component
//! - No rendering or input-mapping dependencies

pub mod detection;
pub mod entity;
pub mod events;
pub mod map;
pub mod scan;
pub mod state;
pub mod tick;
pub mod timers;
pub mod win;

pub use entity::EntityState;
pub use events::{ActiveEvent, EventKind, EventState};
pub use map::{ConcealmentCell, ConcealmentMap, ErrorKind, TEMPLATES};
pub use scan::ScanState;
pub use state::{
    Counters, Direction, GameEvent, GameFlags, GameSession, Position, Snapshot, Status,
    WinConditions, WinReason,
};
pub use tick::Game;
pub use timers::{Scheduler, Timer, TimerKind};
