//! Guess evaluation and feedback types
//!
//! Each guessed letter is classified as:
//! - `Absent` (letter not in the secret, or every occurrence already credited)
//! - `Present` (letter in the secret, wrong position)
//! - `Correct` (letter in the correct position)

use super::Word;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback for one guessed letter
///
/// Ordered `Absent < Present < Correct`, so the best known state of a letter
/// is the maximum over all guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterFeedback {
    Absent,
    Present,
    Correct,
}

impl LetterFeedback {
    /// Single character used in text patterns: `G`, `Y` or `-`
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    /// Emoji square used in share grids
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// A guess together with its per-position feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    word: Word,
    feedback: Vec<LetterFeedback>,
}

impl GuessResult {
    /// The guessed word
    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.word
    }

    /// Feedback, one entry per letter
    #[must_use]
    pub fn feedback(&self) -> &[LetterFeedback] {
        &self.feedback
    }

    /// Letters paired with their feedback, in position order
    pub fn letters(&self) -> impl Iterator<Item = (u8, LetterFeedback)> + '_ {
        self.word.chars().iter().copied().zip(self.feedback.iter().copied())
    }

    /// True when every position is `Correct`
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.feedback.iter().all(|&f| f == LetterFeedback::Correct)
    }

    /// Number of positions with the given feedback
    #[must_use]
    pub fn count(&self, kind: LetterFeedback) -> usize {
        self.feedback.iter().filter(|&&f| f == kind).count()
    }

    /// Feedback as a text pattern like `"GY-G-"`
    #[must_use]
    pub fn pattern(&self) -> String {
        self.feedback.iter().map(|f| f.symbol()).collect()
    }

    /// Feedback as emoji squares like `"🟩🟨⬜🟩⬜"`
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.feedback.iter().map(|f| f.emoji()).collect()
    }
}

impl fmt::Display for GuessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.word.text().to_uppercase(), self.pattern())
    }
}

/// Evaluate `guess` against `secret`
///
/// Implements the exact feedback rules, including duplicate letters.
///
/// # Algorithm
/// 1. First pass: mark exact matches `Correct` and remove them from the
///    pool of the secret's remaining letters
/// 2. Second pass: mark other positions `Present` while the pool still holds
///    that letter, `Absent` otherwise
///
/// # Errors
/// Returns `ValidationError::LengthMismatch` if the words differ in length.
///
/// # Examples
/// ```
/// use lingle::core::{evaluate, Word};
///
/// let secret = Word::new("slate").unwrap();
/// let guess = Word::new("crane").unwrap();
/// let result = evaluate(&secret, &guess).unwrap();
///
/// // C(gray) R(gray) A(green) N(gray) E(green)
/// assert_eq!(result.pattern(), "--G-G");
/// ```
pub fn evaluate(secret: &Word, guess: &Word) -> Result<GuessResult, ValidationError> {
    if secret.len() != guess.len() {
        return Err(ValidationError::LengthMismatch {
            secret: secret.len(),
            guess: guess.len(),
        });
    }

    let secret_chars = secret.chars();
    let guess_chars = guess.chars();
    let mut feedback = vec![LetterFeedback::Absent; guess.len()];
    let mut remaining = secret.char_counts();

    // First pass: greens
    for (i, (&g, &s)) in guess_chars.iter().zip(secret_chars).enumerate() {
        if g == s {
            feedback[i] = LetterFeedback::Correct;
            if let Some(count) = remaining.get_mut(&g) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // Second pass: yellows from what is left in the pool
    for (i, &g) in guess_chars.iter().enumerate() {
        if feedback[i] == LetterFeedback::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&g)
            && *count > 0
        {
            feedback[i] = LetterFeedback::Present;
            *count -= 1;
        }
    }

    Ok(GuessResult {
        word: guess.clone(),
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::LetterFeedback::{Absent, Correct, Present};
    use proptest::prelude::*;

    fn eval(secret: &str, guess: &str) -> GuessResult {
        evaluate(&Word::new(secret).unwrap(), &Word::new(guess).unwrap()).unwrap()
    }

    #[test]
    fn identical_words_all_correct() {
        for word in ["crane", "slate", "alloy", "zzzzz", "aaaaa"] {
            let result = eval(word, word);
            assert!(result.is_solved());
            assert_eq!(result.count(Correct), 5);
        }
    }

    #[test]
    fn disjoint_words_all_absent() {
        let result = eval("fghij", "abcde");
        assert_eq!(result.feedback(), &[Absent; 5]);
        assert!(!result.is_solved());
    }

    #[test]
    fn alloy_loyal_all_present() {
        // A L L O Y vs L O Y A L:
        // 0 L: secret[0]=A, L remains (x2) -> Present
        // 1 O: secret[1]=L, O remains -> Present
        // 2 Y: secret[2]=L, Y remains -> Present
        // 3 A: secret[3]=O, A remains -> Present
        // 4 L: secret[4]=Y, second L remains -> Present
        let result = eval("alloy", "loyal");
        assert_eq!(result.feedback(), &[Present; 5]);
    }

    #[test]
    fn speed_erase_credits_only_two_e() {
        // Secret SPEED, guess ERASE
        // E(yellow) R(gray) A(gray) S(yellow) E(yellow)
        let result = eval("speed", "erase");
        assert_eq!(
            result.feedback(),
            &[Present, Absent, Absent, Present, Present]
        );

        let e_credits = result
            .letters()
            .filter(|&(ch, f)| ch == b'e' && f != Absent)
            .count();
        assert_eq!(e_credits, 2);
    }

    #[test]
    fn green_takes_priority_over_earlier_yellow() {
        // Secret FLOOR, guess ROBOT: first O yellow, second O green
        let result = eval("floor", "robot");
        assert_eq!(result.pattern(), "YY-G-");
    }

    #[test]
    fn single_occurrence_guessed_twice() {
        // Secret has one L and one A: green L wins, first A yellow, the rest gray
        let result = eval("plant", "allay");
        assert_eq!(result.feedback(), &[Present, Correct, Absent, Absent, Absent]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = evaluate(&Word::new("crane").unwrap(), &Word::new("cranes").unwrap());
        assert_eq!(
            err,
            Err(ValidationError::LengthMismatch {
                secret: 5,
                guess: 6
            })
        );
    }

    #[test]
    fn long_words_with_many_repeats() {
        let secret = format!("b{}", "a".repeat(256));
        let guess = format!("ab{}", "a".repeat(255));
        let result = eval(&secret, &guess);

        assert_eq!(result.feedback()[0], Present);
        assert_eq!(result.feedback()[1], Present);
        assert_eq!(result.count(Correct), 255);
        assert_eq!(result.count(Absent), 0);
    }

    #[test]
    fn pattern_and_emoji() {
        let result = eval("slate", "crane");
        assert_eq!(result.pattern(), "--G-G");
        assert_eq!(result.to_emoji(), "⬜⬜🟩⬜🟩");
        assert_eq!(result.to_string(), "CRANE --G-G");
    }

    #[test]
    fn feedback_ordering() {
        assert!(Absent < Present);
        assert!(Present < Correct);
    }

    fn word_strategy() -> impl Strategy<Value = String> {
        "[a-f]{5}"
    }

    proptest! {
        #[test]
        fn credited_letters_never_exceed_secret_occurrences(
            secret in word_strategy(),
            guess in word_strategy(),
        ) {
            let result = eval(&secret, &guess);
            for letter in b'a'..=b'f' {
                let in_secret = secret.bytes().filter(|&c| c == letter).count();
                let credited = result
                    .letters()
                    .filter(|&(c, f)| c == letter && f != Absent)
                    .count();
                prop_assert!(credited <= in_secret);
            }
        }

        #[test]
        fn correct_exactly_where_letters_match(
            secret in word_strategy(),
            guess in word_strategy(),
        ) {
            let result = eval(&secret, &guess);
            for (i, (s, g)) in secret.bytes().zip(guess.bytes()).enumerate() {
                prop_assert_eq!(result.feedback()[i] == Correct, s == g);
            }
        }
    }
}
