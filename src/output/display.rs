//! Display functions for command results

use super::formatters::{create_progress_bar, puzzle_title, tile_row};
use crate::commands::TodayReport;
use crate::core::GuessResult;
use crate::game::{GameStatus, PlayerStats, PuzzleKind};
use colored::Colorize;

/// Print a single evaluated guess: tiles, text pattern and emoji
pub fn print_guess_result(result: &GuessResult) {
    println!(
        "{}  {}  {}",
        tile_row(result),
        result.pattern().bright_black(),
        result.to_emoji()
    );
}

/// Print player statistics with a guess distribution chart
pub fn print_stats(stats: &PlayerStats, max_guesses: usize) {
    println!("\n{}", "═".repeat(50).cyan());
    println!(" {} ", "STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(50).cyan());

    println!("\n   Played:          {}", stats.games_played);
    println!(
        "   Win %:           {}",
        format!("{:.0}", stats.win_percentage()).bright_yellow().bold()
    );
    println!("   Current streak:  {}", stats.current_streak);
    println!("   Max streak:      {}", stats.max_streak);
    if let Some(average) = stats.average_guesses() {
        println!("   Average guesses: {average:.2}");
    }
    if let Some(last) = stats.last_daily {
        println!("   Last daily:      {last}");
    }

    println!("\n📊 {}", "Guess distribution:".bright_cyan().bold());
    let most = stats
        .guess_distribution
        .values()
        .copied()
        .max()
        .unwrap_or(0);
    let rows = stats
        .guess_distribution
        .keys()
        .copied()
        .max()
        .unwrap_or(0)
        .max(max_guesses);
    for guesses in 1..=rows {
        let count = stats.wins_in(guesses);
        let bar = create_progress_bar(f64::from(count), f64::from(most), 30);
        println!("   {guesses:>2}: {} {count}", bar.green());
    }
    println!();
}

/// Print where the player stands on a daily puzzle, without the answer
pub fn print_today(report: &TodayReport) {
    let title = puzzle_title(PuzzleKind::Daily(report.puzzle.date), Some(report.puzzle.number));
    println!("\n{} ({})", title.bright_cyan().bold(), report.puzzle.date);

    let rules = if report.hard_mode {
        "hard mode"
    } else {
        "normal mode"
    };
    println!("   {} guesses, {rules}", report.max_guesses);

    match report.status {
        None => println!("   {}", "Not started yet".bright_black()),
        Some(GameStatus::InProgress) => println!(
            "   In progress: {} of {} guesses used",
            report.guesses_used, report.max_guesses
        ),
        Some(GameStatus::Won) => println!(
            "   {}",
            format!("Solved in {}/{}", report.guesses_used, report.max_guesses)
                .green()
                .bold()
        ),
        Some(GameStatus::Lost) => println!("   {}", "Not solved".red().bold()),
    }
    println!();
}
