//! Game rules: daily schedule, sessions, statistics and the engine

mod daily;
mod engine;
mod session;
mod stats;

pub use daily::{DailyPuzzle, DailySchedule, DateKey, select_index};
pub use engine::{Engine, Turn};
pub use session::{
    DEFAULT_MAX_GUESSES, GameSession, GameStatus, GuessRejection, HardModeViolation, PuzzleKind,
    Rules, SessionState, check_hard_mode, derive_status,
};
pub use stats::{PlayerStats, StatsTracker};
