//! Error types for the puzzle engine
//!
//! Every engine operation reports failures synchronously through
//! [`EngineError`]. The variants follow the error taxonomy of the game:
//! malformed data, bad guesses, operations in the wrong state, dates outside
//! the schedule and storage failures.

use crate::core::WordError;
use crate::game::{DateKey, GuessRejection};
use crate::storage::StorageError;
use thiserror::Error;

/// Convenience alias used across the engine.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Top-level engine error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Malformed input data (word bank construction, length mismatch).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Answer index outside the bank.
    #[error("answer index {index} is out of range (bank has {len} answers)")]
    Index { index: usize, len: usize },

    /// Date before the puzzle epoch.
    #[error("date {date} is before the puzzle epoch {epoch}")]
    Domain { date: DateKey, epoch: DateKey },

    /// Guess refused; the session is unchanged.
    #[error("invalid guess: {0}")]
    InvalidGuess(#[from] GuessRejection),

    /// Guess submitted to a finished session.
    #[error("this game is already over")]
    SessionClosed,

    /// Secret requested while the game is still running.
    #[error("the answer stays hidden until the game is over")]
    Locked,

    /// Outcome recorded for a session that has not finished.
    #[error("only finished games can be recorded")]
    InvalidState,

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Malformed input data. Never silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the {list} word list is empty")]
    EmptyList { list: &'static str },

    #[error("word '{word}' has {found} letters, expected {expected}")]
    InconsistentLength {
        word: String,
        expected: usize,
        found: usize,
    },

    #[error("answer '{0}' is not in the acceptable word list")]
    AnswerNotAcceptable(String),

    #[error("guess has {guess} letters but the secret has {secret}")]
    LengthMismatch { secret: usize, guess: usize },

    #[error("invalid word '{word}': {source}")]
    InvalidWord {
        word: String,
        #[source]
        source: WordError,
    },

    #[error("max guesses must be at least 1")]
    ZeroGuesses,

    #[error("the daily schedule needs at least one answer")]
    NoAnswers,

    #[error("saved game is inconsistent: {0}")]
    InconsistentSession(&'static str),
}
