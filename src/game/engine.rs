//! The puzzle engine
//!
//! [`Engine`] ties the pieces together for one player: it owns the word bank
//! handle, the daily schedule, the rules, the stats tracker and a
//! [`Storage`] implementation. Presentation code only ever calls into the
//! engine.
//!
//! Storage is best effort. Load failures fall back to fresh state, save
//! failures leave the in-memory state valid but unsaved; both are logged and
//! handed to the caller so it can tell the player.

use super::{
    DailyPuzzle, DailySchedule, DateKey, GameSession, GameStatus, PlayerStats, PuzzleKind, Rules,
    SessionState, StatsTracker,
};
use crate::config::Settings;
use crate::core::{GuessResult, Word};
use crate::error::{EngineError, Result};
use crate::storage::{Storage, StorageError};
use crate::wordlists::{BankHandle, WordBank};
use rand::Rng;
use std::sync::Arc;

/// Outcome of one submitted guess
#[derive(Debug)]
pub struct Turn {
    pub result: GuessResult,
    pub status: GameStatus,
    /// Saves that failed while handling this guess
    pub storage_errors: Vec<StorageError>,
}

/// Process-wide game engine
#[derive(Debug)]
pub struct Engine<S> {
    bank: BankHandle,
    schedule: DailySchedule,
    rules: Rules,
    storage: S,
    tracker: StatsTracker,
    pending: Vec<StorageError>,
}

impl<S: Storage> Engine<S> {
    /// Load the bank and stats from `storage`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` if the settings are invalid or the
    /// custom word lists do not form a valid bank. Storage failures are not
    /// errors: the engine starts from the embedded bank and fresh stats.
    pub fn open(storage: S, settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let mut pending = Vec::new();

        let bank = match load_bank(&storage) {
            Ok(bank) => bank,
            Err(EngineError::Storage(e)) => {
                tracing::warn!("Could not load word lists: {e}, using the built-in lists");
                pending.push(e);
                WordBank::embedded()?
            }
            Err(e) => return Err(e),
        };

        let stats = storage.load_stats().unwrap_or_else(|e| {
            tracing::warn!("Could not load stats: {e}, starting fresh");
            pending.push(e);
            PlayerStats::default()
        });

        tracing::info!(
            answers = bank.answer_count(),
            acceptable = bank.acceptable_count(),
            played = stats.games_played,
            "engine ready"
        );

        Ok(Self {
            bank: BankHandle::new(bank),
            schedule: DailySchedule::new(settings.epoch),
            rules: settings.rules(),
            storage,
            tracker: StatsTracker::new(stats),
            pending,
        })
    }

    /// Current word bank
    #[must_use]
    pub fn bank(&self) -> Arc<WordBank> {
        self.bank.snapshot()
    }

    #[must_use]
    pub const fn schedule(&self) -> &DailySchedule {
        &self.schedule
    }

    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    #[must_use]
    pub const fn stats(&self) -> &PlayerStats {
        self.tracker.stats()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Storage failures collected outside of [`Engine::submit`]
    pub fn drain_storage_errors(&mut self) -> Vec<StorageError> {
        std::mem::take(&mut self.pending)
    }

    /// The puzzle scheduled for `date`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` for dates before the epoch.
    pub fn puzzle(&self, date: DateKey) -> Result<DailyPuzzle> {
        self.schedule.puzzle_for(date, &self.bank.snapshot())
    }

    /// Saved progress for `date`, without resuming it
    ///
    /// Saves that no longer match the schedule are ignored, as
    /// [`Engine::start_daily`] ignores them.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` for dates before the epoch and
    /// `EngineError::Storage` if the save could not be read.
    pub fn saved_daily(&self, date: DateKey) -> Result<Option<GameSession>> {
        let bank = self.bank.snapshot();
        let secret = self.schedule.secret_for(date, &bank)?;
        let saved = self.storage.load_session(date)?;
        Ok(saved.and_then(|state| restore_scheduled(date, secret, state)))
    }

    /// Start or resume the daily puzzle for `date`
    ///
    /// A saved session is resumed when it restores cleanly and its secret is
    /// still the scheduled one; otherwise a fresh session starts. A resumed
    /// game that finished without its outcome being recorded (e.g. the stats
    /// save was lost) is recorded now.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` for dates before the epoch.
    pub fn start_daily(&mut self, date: DateKey) -> Result<GameSession> {
        let bank = self.bank.snapshot();
        let secret = self.schedule.secret_for(date, &bank)?.clone();

        let saved = match self.storage.load_session(date) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(%date, "Could not load saved game: {e}");
                self.pending.push(e);
                None
            }
        };

        if let Some(session) = saved.and_then(|state| restore_scheduled(date, &secret, state)) {
            tracing::info!(
                %date,
                guesses = session.history().len(),
                status = ?session.status(),
                "resumed daily puzzle"
            );
            if session.is_finished() && !self.tracker.has_recorded(date) {
                let errors = self.record(&session)?;
                self.pending.extend(errors);
            }
            return Ok(session);
        }

        tracing::info!(%date, "starting daily puzzle");
        Ok(GameSession::new(PuzzleKind::Daily(date), secret, self.rules)?)
    }

    /// Start a practice game with a random answer
    ///
    /// Practice games are never saved or recorded.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` if the rules allow no guesses.
    pub fn start_practice(&self) -> Result<GameSession> {
        let bank = self.bank.snapshot();
        let index = rand::rng().random_range(0..bank.answer_count());
        let secret = bank.answer_at(index)?.clone();
        tracing::info!("starting practice game");
        Ok(GameSession::new(PuzzleKind::Practice, secret, self.rules)?)
    }

    /// Submit a guess for `session`
    ///
    /// Daily sessions are saved after every accepted guess. The first time a
    /// daily session reaches a final state its outcome is recorded in the
    /// stats, exactly once per date. Save failures do not fail the turn.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::SessionClosed` or `EngineError::InvalidGuess`
    /// as [`GameSession::submit_guess`] does; the session is unchanged.
    pub fn submit(&mut self, session: &mut GameSession, text: &str) -> Result<Turn> {
        let bank = self.bank.snapshot();
        let result = session.submit_guess(&bank, text)?.clone();
        let status = session.status();
        let mut storage_errors = Vec::new();

        if let PuzzleKind::Daily(date) = session.kind() {
            if let Err(e) = self.storage.save_session(date, &session.to_state()) {
                tracing::warn!(%date, "Could not save game: {e}");
                storage_errors.push(e);
            }
            if status.is_terminal() && !self.tracker.has_recorded(date) {
                storage_errors.extend(self.record(session)?);
            }
        }

        Ok(Turn {
            result,
            status,
            storage_errors,
        })
    }

    /// Re-read the word lists from storage and swap the bank
    ///
    /// Sessions already running keep their secret.
    ///
    /// # Errors
    ///
    /// Returns the load or validation error; the current bank stays in place.
    pub fn reload_bank(&self) -> Result<()> {
        let bank = load_bank(&self.storage)?;
        tracing::info!(answers = bank.answer_count(), "word bank reloaded");
        self.bank.replace(bank);
        Ok(())
    }

    fn record(&mut self, session: &GameSession) -> Result<Vec<StorageError>> {
        self.tracker.record_outcome(session)?;
        match self.storage.save_stats(self.tracker.stats()) {
            Ok(()) => Ok(Vec::new()),
            Err(e) => {
                tracing::warn!("Could not save stats: {e}");
                Ok(vec![e])
            }
        }
    }
}

/// Rebuild a saved daily session if it still belongs to `date`'s puzzle
fn restore_scheduled(date: DateKey, secret: &Word, state: SessionState) -> Option<GameSession> {
    if state.secret != *secret || state.kind != PuzzleKind::Daily(date) {
        tracing::info!(%date, "saved game is for a different puzzle, ignoring it");
        return None;
    }
    match GameSession::restore(state) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(%date, "Ignoring damaged saved game: {e}");
            None
        }
    }
}

fn load_bank(storage: &impl Storage) -> Result<WordBank> {
    match storage.load_word_bank()? {
        Some(lists) => Ok(WordBank::load(lists.answers, lists.acceptable)?),
        None => Ok(WordBank::embedded()?),
    }
}
