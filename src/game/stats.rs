//! Player statistics
//!
//! [`StatsTracker`] is the only writer of [`PlayerStats`]. Each finished
//! session is folded in exactly once; the tracker does not deduplicate by
//! itself, callers check [`StatsTracker::has_recorded`] for daily puzzles.

use super::{DateKey, GameSession, GameStatus};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate statistics across games
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Wins keyed by the number of guesses they took
    pub guess_distribution: BTreeMap<usize, u32>,
    /// Latest daily puzzle folded into these stats
    pub last_daily: Option<DateKey>,
    /// Every daily puzzle folded into these stats
    pub daily_recorded: BTreeSet<DateKey>,
}

impl PlayerStats {
    #[must_use]
    pub const fn games_lost(&self) -> u32 {
        self.games_played.saturating_sub(self.games_won)
    }

    /// Wins in exactly `guesses` guesses
    #[must_use]
    pub fn wins_in(&self, guesses: usize) -> u32 {
        self.guess_distribution.get(&guesses).copied().unwrap_or(0)
    }

    /// Win rate in percent, 0 when nothing has been played
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) * 100.0 / f64::from(self.games_played)
        }
    }

    /// Mean guesses over won games
    #[must_use]
    pub fn average_guesses(&self) -> Option<f64> {
        let wins: u32 = self.guess_distribution.values().sum();
        if wins == 0 {
            return None;
        }
        let total: f64 = self
            .guess_distribution
            .iter()
            .map(|(&guesses, &count)| guesses as f64 * f64::from(count))
            .sum();
        Some(total / f64::from(wins))
    }
}

/// Folds finished sessions into [`PlayerStats`]
#[derive(Debug, Default)]
pub struct StatsTracker {
    stats: PlayerStats,
}

impl StatsTracker {
    #[must_use]
    pub const fn new(stats: PlayerStats) -> Self {
        Self { stats }
    }

    #[must_use]
    pub const fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Whether the daily puzzle for `date` has been recorded
    ///
    /// Stats written before `daily_recorded` existed only know `last_daily`.
    #[must_use]
    pub fn has_recorded(&self, date: DateKey) -> bool {
        self.stats.daily_recorded.contains(&date) || self.stats.last_daily == Some(date)
    }

    /// Record a finished session
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidState` if the session is still in
    /// progress; the stats are unchanged.
    pub fn record_outcome(&mut self, session: &GameSession) -> Result<()> {
        let status = session.status();
        let stats = &mut self.stats;
        match status {
            GameStatus::InProgress => return Err(EngineError::InvalidState),
            GameStatus::Won => {
                stats.games_played += 1;
                stats.games_won += 1;
                stats.current_streak += 1;
                stats.max_streak = stats.max_streak.max(stats.current_streak);
                *stats
                    .guess_distribution
                    .entry(session.history().len())
                    .or_insert(0) += 1;
            }
            GameStatus::Lost => {
                stats.games_played += 1;
                stats.current_streak = 0;
            }
        }

        if let Some(date) = session.kind().date() {
            stats.daily_recorded.insert(date);
            stats.last_daily = stats.last_daily.max(Some(date));
        }

        tracing::info!(
            ?status,
            played = stats.games_played,
            streak = stats.current_streak,
            "outcome recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::{PuzzleKind, Rules};
    use crate::wordlists::WordBank;
    use crate::wordlists::loader::words_from_slice;

    fn bank() -> WordBank {
        let words =
            words_from_slice(&["crane", "slate", "audio", "pound", "light", "moist"]).unwrap();
        WordBank::load(words.clone(), words).unwrap()
    }

    fn finished(kind: PuzzleKind, guesses: &[&str]) -> GameSession {
        let bank = bank();
        let mut session =
            GameSession::new(kind, Word::new("crane").unwrap(), Rules::default()).unwrap();
        for guess in guesses {
            session.submit_guess(&bank, guess).unwrap();
        }
        session
    }

    fn won_in(k: usize) -> GameSession {
        let misses = ["slate", "audio", "pound", "light", "moist"];
        let mut guesses: Vec<&str> = misses[..k - 1].to_vec();
        guesses.push("crane");
        finished(PuzzleKind::Practice, &guesses)
    }

    fn lost() -> GameSession {
        finished(
            PuzzleKind::Practice,
            &["slate", "audio", "pound", "light", "moist", "slate"],
        )
    }

    #[test]
    fn win_updates_counters_and_bucket() {
        let mut tracker = StatsTracker::default();
        tracker.record_outcome(&won_in(3)).unwrap();

        let stats = tracker.stats();
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.wins_in(3), 1);
    }

    #[test]
    fn win_touches_only_its_bucket() {
        let mut tracker = StatsTracker::default();
        tracker.record_outcome(&won_in(2)).unwrap();
        tracker.record_outcome(&won_in(4)).unwrap();
        let before = tracker.stats().guess_distribution.clone();

        tracker.record_outcome(&won_in(4)).unwrap();

        let after = &tracker.stats().guess_distribution;
        for k in 1..=6 {
            let expected = before.get(&k).copied().unwrap_or(0) + u32::from(k == 4);
            assert_eq!(after.get(&k).copied().unwrap_or(0), expected, "bucket {k}");
        }
    }

    #[test]
    fn loss_resets_streak_but_keeps_max() {
        let mut tracker = StatsTracker::default();
        tracker.record_outcome(&won_in(1)).unwrap();
        tracker.record_outcome(&won_in(2)).unwrap();
        tracker.record_outcome(&lost()).unwrap();

        let stats = tracker.stats();
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.games_lost(), 1);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.guess_distribution.values().sum::<u32>(), 2);

        tracker.record_outcome(&won_in(5)).unwrap();
        assert_eq!(tracker.stats().current_streak, 1);
        assert_eq!(tracker.stats().max_streak, 2);
    }

    #[test]
    fn in_progress_session_is_rejected() {
        let mut tracker = StatsTracker::default();
        let session = finished(PuzzleKind::Practice, &["slate"]);

        let err = tracker.record_outcome(&session).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState));
        assert_eq!(tracker.stats(), &PlayerStats::default());
    }

    #[test]
    fn daily_outcome_marks_date() {
        let date = DateKey::from_ymd(2024, 3, 9).unwrap();
        let mut tracker = StatsTracker::default();
        assert!(!tracker.has_recorded(date));

        tracker
            .record_outcome(&finished(PuzzleKind::Daily(date), &["crane"]))
            .unwrap();

        assert!(tracker.has_recorded(date));
        assert!(!tracker.has_recorded(date.plus_days(1)));
    }

    #[test]
    fn later_date_does_not_mask_earlier_ones() {
        let early = DateKey::from_ymd(2024, 3, 9).unwrap();
        let late = early.plus_days(3000);
        let mut tracker = StatsTracker::default();

        tracker
            .record_outcome(&finished(PuzzleKind::Daily(late), &["crane"]))
            .unwrap();
        assert!(!tracker.has_recorded(early));

        tracker
            .record_outcome(&finished(PuzzleKind::Daily(early), &["crane"]))
            .unwrap();
        let stats = tracker.stats();
        assert!(tracker.has_recorded(early));
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.last_daily, Some(late));
        assert_eq!(stats.daily_recorded.len(), 2);
    }

    #[test]
    fn stats_without_recorded_set_still_know_last_daily() {
        let date = DateKey::from_ymd(2024, 3, 9).unwrap();
        let stats: PlayerStats =
            serde_json::from_str(r#"{"games_played": 1, "last_daily": "2024-03-09"}"#).unwrap();
        let tracker = StatsTracker::new(stats);

        assert!(tracker.has_recorded(date));
        assert!(!tracker.has_recorded(date.plus_days(1)));
    }

    #[test]
    fn derived_figures() {
        let mut stats = PlayerStats::default();
        assert_eq!(stats.win_percentage(), 0.0);
        assert_eq!(stats.average_guesses(), None);

        stats.games_played = 4;
        stats.games_won = 3;
        stats.guess_distribution.insert(2, 1);
        stats.guess_distribution.insert(4, 2);
        assert!((stats.win_percentage() - 75.0).abs() < f64::EPSILON);
        assert_eq!(stats.average_guesses(), Some(10.0 / 3.0));
    }

    #[test]
    fn stats_json_shape() {
        let mut tracker = StatsTracker::default();
        tracker.record_outcome(&won_in(3)).unwrap();

        let json = serde_json::to_value(tracker.stats()).unwrap();
        assert_eq!(json["games_played"], 1);
        assert_eq!(json["guess_distribution"]["3"], 1);

        let parsed: PlayerStats = serde_json::from_value(json).unwrap();
        assert_eq!(&parsed, tracker.stats());

        // Missing fields fall back to defaults
        let partial: PlayerStats = serde_json::from_str(r#"{"games_played": 2}"#).unwrap();
        assert_eq!(partial.games_played, 2);
        assert!(partial.guess_distribution.is_empty());
    }
}
