//! Simple interactive CLI mode
//!
//! Line-based game without the TUI: type a guess, get coloured tiles back.

use super::GameChoice;
use crate::error::EngineError;
use crate::game::{Engine, GameSession, GameStatus};
use crate::output::formatters::{keyboard_lines, puzzle_title, share_text, tile_row};
use crate::storage::{Storage, StorageError};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

enum Outcome {
    Finished,
    Quit,
}

/// Run the simple interactive CLI mode on stdin/stdout
///
/// # Errors
///
/// Returns an error on I/O failure or if the puzzle cannot be started.
pub fn run_simple<S: Storage>(engine: &mut Engine<S>, choice: GameChoice) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play_lines(engine, choice, &mut stdin.lock(), &mut stdout)
}

/// Play from any line source
///
/// Ends on `quit` or end of input. After a game the player may start a
/// practice game.
///
/// # Errors
///
/// Returns an error on I/O failure or if the puzzle cannot be started.
pub fn play_lines<S, R, W>(
    engine: &mut Engine<S>,
    choice: GameChoice,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    writeln!(out, "\n╔══════════════════════════════════════════════╗")?;
    writeln!(out, "║                  L I N G L E                 ║")?;
    writeln!(out, "╚══════════════════════════════════════════════╝\n")?;
    writeln!(out, "Commands: 'keys' shows the keyboard, 'quit' exits\n")?;

    let notices = engine.drain_storage_errors();
    report_storage_errors(out, &notices)?;

    let mut choice = choice;
    loop {
        let mut session = choice.start(engine)?;
        let number = session
            .kind()
            .date()
            .and_then(|date| engine.schedule().puzzle_number(date).ok());

        writeln!(
            out,
            "{}: guess the {}-letter word in {} tries{}",
            puzzle_title(session.kind(), number).bright_cyan().bold(),
            session.word_length(),
            session.max_guesses(),
            if session.rules().hard_mode {
                " (hard mode)"
            } else {
                ""
            }
        )?;
        for result in session.history() {
            writeln!(out, "  {}", tile_row(result))?;
        }

        if !session.is_finished()
            && let Outcome::Quit = play_session(engine, &mut session, input, out)?
        {
            writeln!(out, "\n👋 Progress saved. See you tomorrow!\n")?;
            return Ok(());
        }

        print_finish(out, engine, &session, number)?;

        match read_line(input, out, "Play a practice game? (yes/no)")? {
            Some(answer) if matches!(answer.to_lowercase().as_str(), "yes" | "y") => {
                choice = GameChoice::Practice;
                writeln!(out, "\n🔄 New practice game!\n")?;
            }
            _ => {
                writeln!(out, "\n👋 Thanks for playing!\n")?;
                return Ok(());
            }
        }
    }
}

fn play_session<S, R, W>(
    engine: &mut Engine<S>,
    session: &mut GameSession,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    while !session.is_finished() {
        let prompt = format!(
            "Guess {}/{}",
            session.history().len() + 1,
            session.max_guesses()
        );
        let Some(line) = read_line(input, out, &prompt)? else {
            return Ok(Outcome::Quit);
        };

        match line.to_lowercase().as_str() {
            "" => {}
            "quit" | "q" | "exit" => return Ok(Outcome::Quit),
            "keys" | "k" => {
                for row in keyboard_lines(&session.letter_states()) {
                    writeln!(out, "  {row}")?;
                }
            }
            guess => match engine.submit(session, guess) {
                Ok(turn) => {
                    writeln!(out, "  {}", tile_row(&turn.result))?;
                    report_storage_errors(out, &turn.storage_errors)?;
                }
                Err(EngineError::InvalidGuess(reason)) => {
                    writeln!(out, "  {}", format!("❌ {reason}").red())?;
                }
                Err(e) => return Err(e.into()),
            },
        }
    }
    Ok(Outcome::Finished)
}

fn print_finish<S: Storage, W: Write>(
    out: &mut W,
    engine: &Engine<S>,
    session: &GameSession,
    number: Option<u64>,
) -> Result<()> {
    let guesses = session.history().len();
    writeln!(out, "\n{}", "═".repeat(50).bright_cyan())?;
    if session.status() == GameStatus::Won {
        let cheer = match guesses {
            1 => "🏆 Hole in one!",
            2 => "⭐ Magnificent!",
            3 => "💫 Splendid!",
            4 => "✨ Great!",
            5 => "👍 Nice!",
            _ => "😅 Phew!",
        };
        writeln!(out, "  {}", cheer.bright_yellow().bold())?;
        writeln!(
            out,
            "  {}",
            format!("Solved in {guesses}/{}", session.max_guesses())
                .green()
                .bold()
        )?;
    } else {
        let secret = session.reveal_secret()?;
        writeln!(
            out,
            "  {} The word was {}",
            "Out of guesses.".red().bold(),
            secret.text().to_uppercase().bright_white().bold()
        )?;
    }
    writeln!(out, "{}\n", "═".repeat(50).bright_cyan())?;

    writeln!(out, "{}\n", share_text(session, number))?;

    if session.kind().date().is_some() {
        let stats = engine.stats();
        writeln!(
            out,
            "Played {} | Win {:.0}% | Streak {} | Best {}\n",
            stats.games_played,
            stats.win_percentage(),
            stats.current_streak,
            stats.max_streak
        )?;
    }
    Ok(())
}

fn report_storage_errors<W: Write>(out: &mut W, errors: &[StorageError]) -> Result<()> {
    for error in errors {
        writeln!(out, "  {}", format!("⚠ {}", error.user_message()).yellow())?;
    }
    Ok(())
}

/// Prompt and read one trimmed line; `None` at end of input
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{prompt}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
