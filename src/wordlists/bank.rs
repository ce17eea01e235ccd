//! The word bank: answers and acceptable guesses
//!
//! A bank is immutable once loaded. [`BankHandle`] holds the process-wide
//! bank and swaps in a replacement as a whole, so readers never observe a
//! half-loaded bank.

use super::loader::words_from_slice;
use super::{ALLOWED, ANSWERS};
use crate::core::Word;
use crate::error::{EngineError, ValidationError};
use rustc_hash::FxHashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Answer list plus acceptable-guess set
#[derive(Debug, Clone)]
pub struct WordBank {
    answers: Vec<Word>,
    acceptable: FxHashSet<Word>,
    word_length: usize,
}

impl WordBank {
    /// Build a bank from an ordered answer list and an acceptable set
    ///
    /// The answer order is kept as given: it is the daily schedule.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if either list is empty, if the words do not
    /// all share one length, or if an answer is not acceptable.
    pub fn load(
        answers: Vec<Word>,
        acceptable: impl IntoIterator<Item = Word>,
    ) -> Result<Self, ValidationError> {
        let acceptable: FxHashSet<Word> = acceptable.into_iter().collect();

        let Some(first) = answers.first() else {
            return Err(ValidationError::EmptyList { list: "answer" });
        };
        if acceptable.is_empty() {
            return Err(ValidationError::EmptyList { list: "acceptable" });
        }

        let word_length = first.len();
        if let Some(word) = answers
            .iter()
            .chain(acceptable.iter())
            .find(|w| w.len() != word_length)
        {
            return Err(ValidationError::InconsistentLength {
                word: word.text().to_string(),
                expected: word_length,
                found: word.len(),
            });
        }

        if let Some(missing) = answers.iter().find(|w| !acceptable.contains(*w)) {
            return Err(ValidationError::AnswerNotAcceptable(missing.text().to_string()));
        }

        tracing::debug!(
            answers = answers.len(),
            acceptable = acceptable.len(),
            word_length,
            "word bank loaded"
        );

        Ok(Self {
            answers,
            acceptable,
            word_length,
        })
    }

    /// The bank compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the embedded lists are malformed.
    pub fn embedded() -> Result<Self, ValidationError> {
        Self::load(words_from_slice(ANSWERS)?, words_from_slice(ALLOWED)?)
    }

    /// Case-insensitive membership test
    #[must_use]
    pub fn is_acceptable(&self, text: &str) -> bool {
        let text = text.trim();
        if text.bytes().any(|b| b.is_ascii_uppercase()) {
            self.acceptable.contains(text.to_ascii_lowercase().as_str())
        } else {
            self.acceptable.contains(text)
        }
    }

    /// Membership test for an already validated word
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.acceptable.contains(word)
    }

    /// Answer at a schedule index
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Index` if `index >= answer_count()`.
    pub fn answer_at(&self, index: usize) -> Result<&Word, EngineError> {
        self.answers.get(index).ok_or(EngineError::Index {
            index,
            len: self.answers.len(),
        })
    }

    /// All answers in schedule order
    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn acceptable_count(&self) -> usize {
        self.acceptable.len()
    }

    /// Letters per word in this bank
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }
}

/// Shared, atomically replaceable bank
///
/// Readers take an `Arc` snapshot; the lock is only held for the pointer
/// clone or swap.
#[derive(Debug)]
pub struct BankHandle {
    current: RwLock<Arc<WordBank>>,
}

impl BankHandle {
    #[must_use]
    pub fn new(bank: WordBank) -> Self {
        Self {
            current: RwLock::new(Arc::new(bank)),
        }
    }

    /// Current bank
    #[must_use]
    pub fn snapshot(&self) -> Arc<WordBank> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the whole bank
    pub fn replace(&self, bank: WordBank) {
        let bank = Arc::new(bank);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = bank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        words_from_slice(list).unwrap()
    }

    fn small_bank() -> WordBank {
        WordBank::load(
            words(&["crane", "slate"]),
            words(&["crane", "slate", "irate", "audio"]),
        )
        .unwrap()
    }

    #[test]
    fn load_valid_bank() {
        let bank = small_bank();
        assert_eq!(bank.answer_count(), 2);
        assert_eq!(bank.acceptable_count(), 4);
        assert_eq!(bank.word_length(), 5);
    }

    #[test]
    fn load_rejects_empty_lists() {
        assert_eq!(
            WordBank::load(vec![], words(&["crane"])).unwrap_err(),
            ValidationError::EmptyList { list: "answer" }
        );
        assert_eq!(
            WordBank::load(words(&["crane"]), vec![]).unwrap_err(),
            ValidationError::EmptyList { list: "acceptable" }
        );
    }

    #[test]
    fn load_rejects_inconsistent_lengths() {
        let err = WordBank::load(words(&["crane"]), words(&["crane", "cranes"])).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InconsistentLength {
                expected: 5,
                found: 6,
                ..
            }
        ));
    }

    #[test]
    fn load_rejects_answer_outside_acceptable() {
        let err = WordBank::load(words(&["crane", "slate"]), words(&["crane"])).unwrap_err();
        assert_eq!(err, ValidationError::AnswerNotAcceptable("slate".to_string()));
    }

    #[test]
    fn is_acceptable_case_insensitive() {
        let bank = small_bank();
        assert!(bank.is_acceptable("irate"));
        assert!(bank.is_acceptable("IRATE"));
        assert!(bank.is_acceptable(" Audio "));
        assert!(!bank.is_acceptable("zzzzz"));
        assert!(!bank.is_acceptable(""));
    }

    #[test]
    fn answer_at_bounds() {
        let bank = small_bank();
        assert_eq!(bank.answer_at(0).unwrap().text(), "crane");
        assert_eq!(bank.answer_at(1).unwrap().text(), "slate");
        assert!(matches!(
            bank.answer_at(2),
            Err(EngineError::Index { index: 2, len: 2 })
        ));
    }

    #[test]
    fn answers_keep_given_order() {
        let bank = WordBank::load(words(&["slate", "crane"]), words(&["crane", "slate"])).unwrap();
        assert_eq!(bank.answers()[0].text(), "slate");
    }

    #[test]
    fn embedded_bank_loads() {
        let bank = WordBank::embedded().unwrap();
        assert_eq!(bank.answer_count(), ANSWERS.len());
        assert_eq!(bank.word_length(), 5);
        assert!(bank.is_acceptable("crane"));
    }

    #[test]
    fn handle_replaces_whole_bank() {
        let handle = BankHandle::new(small_bank());
        let before = handle.snapshot();

        let replacement = WordBank::load(words(&["audio"]), words(&["audio"])).unwrap();
        handle.replace(replacement);

        // Old snapshot is untouched, new readers see the new bank
        assert_eq!(before.answer_count(), 2);
        assert_eq!(handle.snapshot().answer_count(), 1);
        assert_eq!(handle.snapshot().answers()[0].text(), "audio");
    }
}
