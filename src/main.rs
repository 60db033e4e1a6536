//! Bug Scan entry point
//!
//! Headless driver: loads settings, plays a session with a simple autopilot
//! on a simulated 60 Hz clock and prints the result.

use bug_scan::consts::FRAME_MS;
use bug_scan::sim::{Direction, Game, GameEvent, Snapshot, Status};
use bug_scan::{Difficulty, Leaderboard, Settings};

/// Give up after ten simulated minutes
const MAX_SIM_MS: u64 = 10 * 60 * 1000;

fn main() {
    env_logger::init();
    log::info!("Bug Scan (native) starting...");

    // Usage: bug-scan [--difficulty easy|medium|hard] [settings.json]
    let mut path = None;
    let mut difficulty = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--difficulty" {
            let value = args.next().unwrap_or_default();
            difficulty = Difficulty::from_str(&value);
            if difficulty.is_none() {
                log::warn!("Unknown difficulty '{value}'; keeping the configured one");
            }
        } else {
            path = Some(arg);
        }
    }

    let mut settings = match path {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };
    if let Some(difficulty) = difficulty {
        settings.difficulty = difficulty;
    }
    let tuning = match settings.tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut game = match settings.seed {
        Some(seed) => Game::new(tuning, seed),
        None => Game::with_random_seed(tuning),
    };
    log::info!(
        "Game initialized with seed: {} ({})",
        game.seed(),
        settings.difficulty.as_str()
    );

    let mut now = 0;
    game.start(now);
    while game.status() == Status::Alive && now < MAX_SIM_MS {
        now += FRAME_MS;
        for direction in autopilot(&game.snapshot()) {
            game.apply_directional_input(direction);
        }
        for event in game.tick(now) {
            report(&event);
        }
    }

    let snap = game.snapshot();
    println!(
        "{:?} after {}s, {} scans survived (seed {})",
        snap.status,
        snap.counters.elapsed_seconds,
        snap.counters.cycles_survived,
        game.seed()
    );

    let mut leaderboard = Leaderboard::new();
    if let Some(rank) = game
        .session_record(&settings.player_name)
        .and_then(|record| leaderboard.add(record))
    {
        log::info!("{} placed #{}", settings.player_name, rank);
    }
    match leaderboard.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not export leaderboard: {e}"),
    }
}

/// Stay one step behind the scan: when the next scanned line is ours,
/// slip past the laser onto lines it has already checked.
fn autopilot(snap: &Snapshot) -> Vec<Direction> {
    if !snap.scan_active || snap.total_lines == 0 {
        return Vec::new();
    }
    let line = snap.position.line;
    let next = if snap.scan_line >= snap.total_lines {
        1
    } else {
        snap.scan_line + 1
    };
    if next != line {
        return Vec::new();
    }
    if line == 1 {
        vec![Direction::Down]
    } else {
        vec![Direction::Up, Direction::Up]
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::ScannerActivated => println!("COMPILER SCAN STARTED"),
        GameEvent::CycleCompleted { cycles, step_ms } => {
            println!("Scan #{cycles} complete, next sweep at {step_ms}ms/line")
        }
        GameEvent::Survived { line } => println!("Scan passed line {line}: hidden in an error!"),
        GameEvent::Caught { line } => println!("BUG DETECTED on line {line}"),
        GameEvent::Won { reason } => println!("DEBUGGING SESSION SUCCESSFUL ({reason:?})"),
        GameEvent::EventTriggered { kind } => {
            println!("{}: {}", kind.name(), kind.description())
        }
        _ => log::trace!("{:?}", event),
    }
}
