//! Persistence port
//!
//! The engine only talks to storage through [`Storage`]. Implementations:
//!
//! - [`JsonStore`]: JSON files under a data directory, written atomically
//! - [`MemoryStore`]: in-process maps, used by tests
//!
//! A failing store never takes the game down: the engine falls back to fresh
//! state and reports the error.

mod json;
mod memory;

pub use json::JsonStore;
pub(crate) use json::write_atomic;
pub use memory::MemoryStore;

use crate::core::Word;
use crate::error::ValidationError;
use crate::game::{DateKey, PlayerStats, SessionState};
use std::path::PathBuf;
use thiserror::Error;

/// Raw answer and acceptable lists, before bank validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLists {
    pub answers: Vec<Word>,
    pub acceptable: Vec<Word>,
}

/// Load/save contract used by the engine
pub trait Storage {
    /// Custom word lists, or `None` to use the embedded bank
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on I/O failure or a malformed list file.
    fn load_word_bank(&self) -> Result<Option<WordLists>, StorageError>;

    /// Saved stats; defaults when nothing has been saved yet
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on I/O or parse failure.
    fn load_stats(&self) -> Result<PlayerStats, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the stats could not be written.
    fn save_stats(&self, stats: &PlayerStats) -> Result<(), StorageError>;

    /// Saved session for a daily puzzle
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on I/O or parse failure.
    fn load_session(&self, date: DateKey) -> Result<Option<SessionState>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the session could not be written.
    fn save_session(&self, date: DateKey, state: &SessionState) -> Result<(), StorageError>;
}

/// Persistence failure
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// File I/O error.
    #[error("failed to {operation} {}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encode/decode error.
    #[error("invalid JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A word list file contains a malformed entry.
    #[error("invalid word list {}", path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    /// The store refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Short message suitable for the status line
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { .. } | Self::Unavailable(_) => {
                format!("Progress could not be saved or loaded ({self})")
            }
            Self::Json { .. } => format!("Saved data is damaged and was ignored ({self})"),
            Self::WordList { source, .. } => format!("{self}: {source}"),
        }
    }
}
