//! In-memory store
//!
//! Keeps everything in a `Mutex` so it can be shared like the file store.
//! [`MemoryStore::failing`] simulates a broken disk: loads still work,
//! every save fails.

use super::{Storage, StorageError, WordLists};
use crate::game::{DateKey, PlayerStats, SessionState};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    word_lists: Option<WordLists>,
    stats: Option<PlayerStats>,
    sessions: BTreeMap<DateKey, SessionState>,
    saves: usize,
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_saves: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves always fail
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Pre-load custom word lists
    #[must_use]
    pub fn with_word_lists(self, lists: WordLists) -> Self {
        self.lock().word_lists = Some(lists);
        self
    }

    /// Pre-load stats
    #[must_use]
    pub fn with_stats(self, stats: PlayerStats) -> Self {
        self.lock().stats = Some(stats);
        self
    }

    /// Swap the custom word lists, as if the files were edited
    pub fn set_word_lists(&self, lists: Option<WordLists>) {
        self.lock().word_lists = lists;
    }

    /// Saved stats, if any
    #[must_use]
    pub fn saved_stats(&self) -> Option<PlayerStats> {
        self.lock().stats.clone()
    }

    /// Number of successful saves so far
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_saves {
            Err(StorageError::Unavailable("memory store is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStore {
    fn load_word_bank(&self) -> Result<Option<WordLists>, StorageError> {
        Ok(self.lock().word_lists.clone())
    }

    fn load_stats(&self) -> Result<PlayerStats, StorageError> {
        Ok(self.lock().stats.clone().unwrap_or_default())
    }

    fn save_stats(&self, stats: &PlayerStats) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut inner = self.lock();
        inner.stats = Some(stats.clone());
        inner.saves += 1;
        Ok(())
    }

    fn load_session(&self, date: DateKey) -> Result<Option<SessionState>, StorageError> {
        Ok(self.lock().sessions.get(&date).cloned())
    }

    fn save_session(&self, date: DateKey, state: &SessionState) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut inner = self.lock();
        inner.sessions.insert(date, state.clone());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::{PuzzleKind, Rules};

    #[test]
    fn saves_are_readable() {
        let store = MemoryStore::new();
        let date = DateKey::from_ymd(2024, 1, 2).unwrap();
        let state = SessionState {
            kind: PuzzleKind::Daily(date),
            secret: Word::new("crane").unwrap(),
            rules: Rules::default(),
            guesses: vec![],
        };

        store.save_session(date, &state).unwrap();
        store.save_stats(&PlayerStats::default()).unwrap();

        assert_eq!(store.load_session(date).unwrap(), Some(state));
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn failing_store_rejects_saves() {
        let store = MemoryStore::failing();
        let err = store.save_stats(&PlayerStats::default()).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(store.saved_stats().is_none());
        assert_eq!(store.load_stats().unwrap(), PlayerStats::default());
    }
}
