//! Command implementations

pub mod score;
pub mod simple;
pub mod today;

pub use score::score_guess;
pub use simple::{play_lines, run_simple};
pub use today::{TodayReport, today_report};

use crate::error::Result;
use crate::game::{DateKey, Engine, GameSession};
use crate::storage::Storage;

/// Which puzzle to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChoice {
    Daily(DateKey),
    Practice,
}

impl GameChoice {
    /// From the `--practice` and `--date` flags; the daily puzzle for today
    /// when neither is given
    #[must_use]
    pub fn from_flags(practice: bool, date: Option<DateKey>) -> Self {
        if practice {
            Self::Practice
        } else {
            Self::Daily(date.unwrap_or_else(DateKey::today))
        }
    }

    /// Start or resume the chosen game
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` for a daily date before the epoch.
    pub fn start<S: Storage>(self, engine: &mut Engine<S>) -> Result<GameSession> {
        match self {
            Self::Daily(date) => engine.start_daily(date),
            Self::Practice => engine.start_practice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_pick_the_game() {
        let date = DateKey::from_ymd(2024, 1, 2).unwrap();
        assert_eq!(GameChoice::from_flags(true, Some(date)), GameChoice::Practice);
        assert_eq!(GameChoice::from_flags(false, Some(date)), GameChoice::Daily(date));
        assert!(matches!(
            GameChoice::from_flags(false, None),
            GameChoice::Daily(_)
        ));
    }
}
