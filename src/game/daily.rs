//! Daily puzzle selection
//!
//! A date maps to an answer index by counting days since a fixed epoch and
//! wrapping around the answer list. Everyone playing on the same UTC date
//! gets the same word.
//!
//! The wraparound means inserting answers anywhere but the end of the list
//! shifts every future date. That is a known limitation of the schedule and
//! is kept as is: players rely on the published sequence.

use crate::core::Word;
use crate::error::{EngineError, Result, ValidationError};
use crate::wordlists::WordBank;
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Epoch used when no other is configured
    pub const DEFAULT_EPOCH: Self = Self(
        match NaiveDate::from_ymd_opt(2021, 6, 19) {
            Some(date) => date,
            None => panic!("valid epoch"),
        },
    );

    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns `None` for an impossible calendar date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in UTC
    #[must_use]
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Whole days from `epoch` to `self`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` if `self` is before `epoch`.
    pub fn days_since(self, epoch: Self) -> Result<u64> {
        let days = self.0.signed_duration_since(epoch.0).num_days();
        u64::try_from(days).map_err(|_| EngineError::Domain { date: self, epoch })
    }

    /// The day `days` after this one, saturating at the calendar's end
    #[must_use]
    pub fn plus_days(self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

/// Map a date to an index into an answer list of `answer_count` entries
///
/// # Errors
///
/// Returns `EngineError::Domain` for dates before `epoch` and
/// `ValidationError::NoAnswers` when `answer_count` is 0.
///
/// # Examples
/// ```
/// use lingle::game::{select_index, DateKey};
///
/// let epoch = DateKey::from_ymd(2024, 1, 1).unwrap();
/// let date = DateKey::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(select_index(epoch, 7, epoch).unwrap(), 0);
/// assert_eq!(select_index(date, 7, epoch).unwrap(), 3);
/// ```
pub fn select_index(date: DateKey, answer_count: usize, epoch: DateKey) -> Result<usize> {
    if answer_count == 0 {
        return Err(ValidationError::NoAnswers.into());
    }
    let days = date.days_since(epoch)?;
    // The remainder is below answer_count, so it fits in usize
    Ok((days % answer_count as u64) as usize)
}

/// A scheduled puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPuzzle {
    pub date: DateKey,
    /// Days since the epoch; the number players quote when sharing
    pub number: u64,
    /// Index into the bank's answer list
    pub index: usize,
}

/// Date-to-puzzle schedule anchored at an epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    epoch: DateKey,
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self::new(DateKey::DEFAULT_EPOCH)
    }
}

impl DailySchedule {
    #[must_use]
    pub const fn new(epoch: DateKey) -> Self {
        Self { epoch }
    }

    #[must_use]
    pub const fn epoch(&self) -> DateKey {
        self.epoch
    }

    /// Puzzle number for a date
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` for dates before the epoch.
    pub fn puzzle_number(&self, date: DateKey) -> Result<u64> {
        date.days_since(self.epoch)
    }

    /// The puzzle scheduled for `date` in `bank`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` for dates before the epoch.
    pub fn puzzle_for(&self, date: DateKey, bank: &WordBank) -> Result<DailyPuzzle> {
        let number = self.puzzle_number(date)?;
        let index = select_index(date, bank.answer_count(), self.epoch)?;
        Ok(DailyPuzzle {
            date,
            number,
            index,
        })
    }

    /// The secret for `date`
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Domain` for dates before the epoch.
    pub fn secret_for<'b>(&self, date: DateKey, bank: &'b WordBank) -> Result<&'b Word> {
        let puzzle = self.puzzle_for(date, bank)?;
        bank.answer_at(puzzle.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::from_ymd(y, m, d).unwrap()
    }

    fn bank() -> WordBank {
        let words = words_from_slice(&["crane", "slate", "audio"]).unwrap();
        WordBank::load(words.clone(), words).unwrap()
    }

    #[test]
    fn epoch_selects_first_answer() {
        let epoch = date(2024, 1, 1);
        assert_eq!(select_index(epoch, 10, epoch).unwrap(), 0);
    }

    #[test]
    fn index_wraps_around() {
        let epoch = date(2024, 1, 1);
        assert_eq!(select_index(date(2024, 1, 3), 3, epoch).unwrap(), 2);
        assert_eq!(select_index(date(2024, 1, 4), 3, epoch).unwrap(), 0);
        // Leap day counts
        assert_eq!(select_index(date(2024, 3, 1), 1000, epoch).unwrap(), 60);
    }

    #[test]
    fn date_before_epoch_is_domain_error() {
        let epoch = date(2024, 1, 1);
        let err = select_index(date(2023, 12, 31), 10, epoch).unwrap_err();
        assert!(matches!(err, EngineError::Domain { .. }));
    }

    #[test]
    fn zero_answers_is_validation_error() {
        let epoch = date(2024, 1, 1);
        let err = select_index(epoch, 0, epoch).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::NoAnswers)
        ));
    }

    #[test]
    fn every_answer_is_eventually_selected() {
        let epoch = date(2024, 1, 1);
        let mut seen = [false; 7];
        for day in 0..7 {
            seen[select_index(epoch.plus_days(day), 7, epoch).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn schedule_numbers_and_secrets() {
        let schedule = DailySchedule::new(date(2024, 1, 1));
        let bank = bank();

        let puzzle = schedule.puzzle_for(date(2024, 1, 5), &bank).unwrap();
        assert_eq!(puzzle.number, 4);
        assert_eq!(puzzle.index, 1);
        assert_eq!(
            schedule.secret_for(date(2024, 1, 5), &bank).unwrap().text(),
            "slate"
        );
    }

    #[test]
    fn default_epoch() {
        assert_eq!(DateKey::DEFAULT_EPOCH.to_string(), "2021-06-19");
        assert_eq!(DailySchedule::default().epoch(), DateKey::DEFAULT_EPOCH);
    }

    #[test]
    fn date_key_parse_and_serde() {
        let key: DateKey = "2024-02-29".parse().unwrap();
        assert_eq!(key, date(2024, 2, 29));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-02-29\"");
        assert!("2023-02-29".parse::<DateKey>().is_err());
        assert!("yesterday".parse::<DateKey>().is_err());
    }

    proptest! {
        #[test]
        fn selection_is_deterministic_and_in_range(
            offset in 0u64..100_000,
            count in 1usize..5_000,
        ) {
            let epoch = DateKey::DEFAULT_EPOCH;
            let day = epoch.plus_days(offset);
            let first = select_index(day, count, epoch).unwrap();
            let second = select_index(day, count, epoch).unwrap();
            prop_assert_eq!(first, second);
            prop_assert!(first < count);
            prop_assert_eq!(first as u64, offset % count as u64);
        }
    }
}
