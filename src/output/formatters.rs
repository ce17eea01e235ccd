//! Formatting utilities for terminal output

use crate::core::{GuessResult, LetterFeedback};
use crate::game::{GameSession, GameStatus, PuzzleKind};
use colored::{ColoredString, Colorize};
use std::collections::BTreeMap;

pub(crate) const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// One letter as a coloured tile, e.g. ` C ` on green
#[must_use]
pub fn tile(letter: u8, feedback: LetterFeedback) -> ColoredString {
    let text = format!(" {} ", letter.to_ascii_uppercase() as char);
    match feedback {
        LetterFeedback::Correct => text.black().on_green().bold(),
        LetterFeedback::Present => text.black().on_yellow().bold(),
        LetterFeedback::Absent => text.white().on_bright_black().bold(),
    }
}

/// A guess as a row of coloured tiles
#[must_use]
pub fn tile_row(result: &GuessResult) -> String {
    result
        .letters()
        .map(|(letter, feedback)| tile(letter, feedback).to_string())
        .collect()
}

/// QWERTY keyboard rows, keys coloured by what is known about each letter
#[must_use]
pub fn keyboard_lines(states: &BTreeMap<u8, LetterFeedback>) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let keys: String = row
                .bytes()
                .map(|letter| match states.get(&letter) {
                    Some(&feedback) => tile(letter, feedback).to_string(),
                    None => format!(" {} ", letter.to_ascii_uppercase() as char),
                })
                .collect();
            format!("{}{keys}", " ".repeat(indent * 2))
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Title line for a puzzle, e.g. `Lingle #1234` or `Lingle practice`
#[must_use]
pub fn puzzle_title(kind: PuzzleKind, number: Option<u64>) -> String {
    match (kind, number) {
        (PuzzleKind::Daily(_), Some(number)) => format!("Lingle #{number}"),
        (PuzzleKind::Daily(date), None) => format!("Lingle {date}"),
        (PuzzleKind::Practice, _) => "Lingle practice".to_string(),
    }
}

/// Spoiler-free result to paste elsewhere
///
/// ```text
/// Lingle #1234 3/6*
///
/// ⬜⬜🟨⬜⬜
/// 🟩⬜🟨⬜🟩
/// 🟩🟩🟩🟩🟩
/// ```
///
/// `X` replaces the guess count for a loss; `*` marks hard mode.
#[must_use]
pub fn share_text(session: &GameSession, number: Option<u64>) -> String {
    let score = match session.status() {
        GameStatus::Won => session.history().len().to_string(),
        GameStatus::Lost => "X".to_string(),
        GameStatus::InProgress => "?".to_string(),
    };
    let hard = if session.rules().hard_mode { "*" } else { "" };

    let mut text = format!(
        "{} {score}/{}{hard}\n",
        puzzle_title(session.kind(), number),
        session.max_guesses()
    );
    for result in session.history() {
        text.push('\n');
        text.push_str(&result.to_emoji());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::{DateKey, Rules};
    use crate::wordlists::WordBank;
    use crate::wordlists::loader::words_from_slice;

    fn bank() -> WordBank {
        let words = words_from_slice(&["crane", "slate", "audio", "brick"]).unwrap();
        WordBank::load(words.clone(), words).unwrap()
    }

    fn daily(rules: Rules) -> GameSession {
        let date = DateKey::from_ymd(2024, 5, 1).unwrap();
        GameSession::new(PuzzleKind::Daily(date), Word::new("crane").unwrap(), rules).unwrap()
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(100.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn titles() {
        let date = DateKey::from_ymd(2024, 5, 1).unwrap();
        assert_eq!(puzzle_title(PuzzleKind::Daily(date), Some(42)), "Lingle #42");
        assert_eq!(puzzle_title(PuzzleKind::Daily(date), None), "Lingle 2024-05-01");
        assert_eq!(puzzle_title(PuzzleKind::Practice, Some(1)), "Lingle practice");
    }

    #[test]
    fn share_text_for_win() {
        let bank = bank();
        let mut session = daily(Rules::default());
        session.submit_guess(&bank, "slate").unwrap();
        session.submit_guess(&bank, "crane").unwrap();

        assert_eq!(
            share_text(&session, Some(7)),
            "Lingle #7 2/6\n\n⬜⬜🟩⬜🟩\n🟩🟩🟩🟩🟩"
        );
    }

    #[test]
    fn share_text_for_hard_mode_loss() {
        let bank = bank();
        let rules = Rules {
            max_guesses: 1,
            hard_mode: true,
        };
        let mut session = daily(rules);
        session.submit_guess(&bank, "audio").unwrap();

        let text = share_text(&session, Some(3));
        assert!(text.starts_with("Lingle #3 X/1*\n"));
        assert!(!text.contains("crane"));
        assert!(!text.to_lowercase().contains("crane"));
    }

    #[test]
    fn keyboard_has_three_rows() {
        colored::control::set_override(false);
        let mut states = BTreeMap::new();
        states.insert(b'q', LetterFeedback::Absent);
        let lines = keyboard_lines(&states);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" Q  W "));
        assert!(lines[2].starts_with("     Z "));
    }

    #[test]
    fn tile_row_has_every_letter() {
        colored::control::set_override(false);
        let secret = Word::new("crane").unwrap();
        let guess = Word::new("brick").unwrap();
        let result = crate::core::evaluate(&secret, &guess).unwrap();
        assert_eq!(tile_row(&result), " B  R  I  C  K ");
    }
}
