//! Puzzle number and saved progress for a date

use crate::error::Result;
use crate::game::{DailyPuzzle, DateKey, Engine, GameStatus};
use crate::storage::Storage;

/// Where the player stands on one daily puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayReport {
    pub puzzle: DailyPuzzle,
    /// `None` when nothing has been saved for the date
    pub status: Option<GameStatus>,
    pub guesses_used: usize,
    pub max_guesses: usize,
    pub hard_mode: bool,
}

/// Build the report without starting or resuming the game
///
/// # Errors
///
/// Returns `EngineError::Domain` for dates before the epoch and
/// `EngineError::Storage` if the saved game could not be read.
pub fn today_report<S: Storage>(engine: &Engine<S>, date: DateKey) -> Result<TodayReport> {
    let puzzle = engine.puzzle(date)?;
    let saved = engine.saved_daily(date)?;
    let rules = saved.as_ref().map_or_else(|| engine.rules(), |s| s.rules());

    Ok(TodayReport {
        puzzle,
        status: saved.as_ref().map(|s| s.status()),
        guesses_used: saved.as_ref().map_or(0, |s| s.history().len()),
        max_guesses: rules.max_guesses,
        hard_mode: rules.hard_mode,
    })
}
