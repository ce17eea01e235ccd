//! Game session state machine
//!
//! A session starts `InProgress`, accepts guesses until one is fully
//! correct (`Won`) or the guess budget is spent (`Lost`), and is frozen from
//! then on. The status is always recomputed from the history with
//! [`derive_status`], never tracked with separate flags.

use super::DateKey;
use crate::core::{GuessResult, LetterFeedback, Word, WordError, evaluate};
use crate::error::{EngineError, Result, ValidationError};
use crate::wordlists::WordBank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Default guess budget
pub const DEFAULT_MAX_GUESSES: usize = 6;

/// Where a session's secret came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    Daily(DateKey),
    Practice,
}

impl PuzzleKind {
    /// Date of a daily puzzle
    #[must_use]
    pub const fn date(self) -> Option<DateKey> {
        match self {
            Self::Daily(date) => Some(date),
            Self::Practice => None,
        }
    }
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Rules a session is played under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub max_guesses: usize,
    pub hard_mode: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
            hard_mode: false,
        }
    }
}

/// Why a guess was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessRejection {
    #[error("{0}")]
    Malformed(#[from] WordError),
    #[error("guess must be {expected} letters, got {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("'{0}' is not in the word list")]
    NotInWordList(String),
    #[error("{0}")]
    HardMode(#[from] HardModeViolation),
}

/// A hard-mode guess that ignores a revealed hint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardModeViolation {
    #[error("letter {position} must be {}", upper(.letter))]
    MissingCorrect { position: usize, letter: u8 },
    #[error("guess must contain {}", upper(.letter))]
    MissingPresent { letter: u8 },
}

fn upper(letter: &u8) -> char {
    letter.to_ascii_uppercase() as char
}

/// Status implied by a history
///
/// `Won` iff the last result is all `Correct`; `Lost` iff the history has
/// reached `max_guesses` without a win.
#[must_use]
pub fn derive_status(history: &[GuessResult], max_guesses: usize) -> GameStatus {
    match history.last() {
        Some(last) if last.is_solved() => GameStatus::Won,
        _ if history.len() >= max_guesses => GameStatus::Lost,
        _ => GameStatus::InProgress,
    }
}

/// Check a hard-mode guess against every earlier result
///
/// # Errors
///
/// Returns the first violated hint.
pub fn check_hard_mode(history: &[GuessResult], guess: &Word) -> Result<(), HardModeViolation> {
    let counts = guess.char_counts();

    for previous in history {
        for (position, (letter, feedback)) in previous.letters().enumerate() {
            if feedback == LetterFeedback::Correct && guess.chars().get(position) != Some(&letter) {
                return Err(HardModeViolation::MissingCorrect {
                    position: position + 1,
                    letter,
                });
            }
        }

        let mut credited: BTreeMap<u8, usize> = BTreeMap::new();
        for (letter, feedback) in previous.letters() {
            if feedback != LetterFeedback::Absent {
                *credited.entry(letter).or_default() += 1;
            }
        }
        for (letter, needed) in credited {
            if counts.get(&letter).copied().unwrap_or(0) < needed {
                return Err(HardModeViolation::MissingPresent { letter });
            }
        }
    }

    Ok(())
}

/// One puzzle attempt
#[derive(Debug, Clone)]
pub struct GameSession {
    kind: PuzzleKind,
    secret: Word,
    rules: Rules,
    history: Vec<GuessResult>,
    status: GameStatus,
}

impl GameSession {
    /// Start a session
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ZeroGuesses` if the rules allow no guesses.
    pub fn new(kind: PuzzleKind, secret: Word, rules: Rules) -> Result<Self, ValidationError> {
        if rules.max_guesses == 0 {
            return Err(ValidationError::ZeroGuesses);
        }
        Ok(Self {
            kind,
            secret,
            rules,
            history: Vec::with_capacity(rules.max_guesses),
            status: GameStatus::InProgress,
        })
    }

    /// Submit a guess
    ///
    /// On success the result is appended to the history and the status is
    /// re-derived. On any error the session is unchanged.
    ///
    /// # Errors
    ///
    /// - `EngineError::SessionClosed` if the game is over
    /// - `EngineError::InvalidGuess` if the text is not a word of the right
    ///   length, not acceptable in `bank`, or breaks hard-mode hints
    pub fn submit_guess(&mut self, bank: &WordBank, text: &str) -> Result<&GuessResult> {
        if self.status.is_terminal() {
            return Err(EngineError::SessionClosed);
        }

        let guess = Word::new(text).map_err(GuessRejection::from)?;
        if guess.len() != self.secret.len() {
            return Err(GuessRejection::WrongLength {
                expected: self.secret.len(),
                found: guess.len(),
            }
            .into());
        }
        if !bank.contains(&guess) {
            return Err(GuessRejection::NotInWordList(guess.text().to_string()).into());
        }
        if self.rules.hard_mode {
            check_hard_mode(&self.history, &guess).map_err(GuessRejection::from)?;
        }

        let result = evaluate(&self.secret, &guess)?;
        tracing::debug!(guess = %guess, pattern = %result.pattern(), "guess accepted");
        let index = self.history.len();
        self.history.push(result);
        self.status = derive_status(&self.history, self.rules.max_guesses);

        if self.status.is_terminal() {
            tracing::info!(
                status = ?self.status,
                guesses = self.history.len(),
                "game finished"
            );
        }

        Ok(&self.history[index])
    }

    /// The secret, once the game is over
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Locked` while the game is in progress.
    pub fn reveal_secret(&self) -> Result<&Word> {
        if self.status.is_terminal() {
            Ok(&self.secret)
        } else {
            Err(EngineError::Locked)
        }
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn history(&self) -> &[GuessResult] {
        &self.history
    }

    #[must_use]
    pub const fn kind(&self) -> PuzzleKind {
        self.kind
    }

    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    #[must_use]
    pub const fn max_guesses(&self) -> usize {
        self.rules.max_guesses
    }

    #[must_use]
    pub fn guesses_remaining(&self) -> usize {
        self.rules.max_guesses.saturating_sub(self.history.len())
    }

    /// Letters per word
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.secret.len()
    }

    /// Best known feedback for every guessed letter
    #[must_use]
    pub fn letter_states(&self) -> BTreeMap<u8, LetterFeedback> {
        let mut states = BTreeMap::new();
        for (letter, feedback) in self.history.iter().flat_map(GuessResult::letters) {
            states
                .entry(letter)
                .and_modify(|best: &mut LetterFeedback| *best = (*best).max(feedback))
                .or_insert(feedback);
        }
        states
    }

    /// Serializable snapshot
    #[must_use]
    pub fn to_state(&self) -> SessionState {
        SessionState {
            kind: self.kind,
            secret: self.secret.clone(),
            rules: self.rules,
            guesses: self.history.iter().map(|r| r.word().clone()).collect(),
        }
    }

    /// Rebuild a session from a snapshot
    ///
    /// Guesses are re-evaluated, so feedback and status always agree with the
    /// secret. The word list is not consulted: a guess accepted in the past
    /// stays valid even if the list has since changed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the snapshot could not have been produced
    /// by a real game.
    pub fn restore(state: SessionState) -> Result<Self> {
        let SessionState {
            kind,
            secret,
            rules,
            guesses,
        } = state;

        let mut session = Self::new(kind, secret, rules)?;
        if guesses.len() > rules.max_guesses {
            return Err(ValidationError::InconsistentSession("more guesses than allowed").into());
        }

        for guess in &guesses {
            if session.status.is_terminal() {
                return Err(ValidationError::InconsistentSession("guess after game over").into());
            }
            let result = evaluate(&session.secret, guess)?;
            session.history.push(result);
            session.status = derive_status(&session.history, rules.max_guesses);
        }

        Ok(session)
    }
}

/// Serializable session snapshot
///
/// Only the guessed words are stored; feedback and status are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub kind: PuzzleKind,
    pub secret: Word,
    pub rules: Rules,
    pub guesses: Vec<Word>,
}
