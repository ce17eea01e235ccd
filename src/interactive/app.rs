//! TUI application state and logic

use crate::commands::GameChoice;
use crate::error::EngineError;
use crate::game::{Engine, GameSession, GameStatus};
use crate::output::share_text;
use crate::storage::{Storage, StorageError};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

const MAX_MESSAGES: usize = 6;

/// Application state
pub struct App<S> {
    pub engine: Engine<S>,
    pub session: GameSession,
    pub puzzle_number: Option<u64>,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub input_mode: InputMode,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Warning,
    Error,
}

impl<S: Storage> App<S> {
    /// Start (or resume) the chosen game
    ///
    /// # Errors
    ///
    /// Returns an error if the puzzle cannot be started.
    pub fn new(mut engine: Engine<S>, choice: GameChoice) -> Result<Self, EngineError> {
        let session = choice.start(&mut engine)?;
        let mut app = Self {
            engine,
            session,
            puzzle_number: None,
            input_buffer: String::new(),
            messages: Vec::new(),
            input_mode: InputMode::Guessing,
            should_quit: false,
        };
        app.begin();
        Ok(app)
    }

    fn begin(&mut self) {
        self.puzzle_number = self
            .session
            .kind()
            .date()
            .and_then(|date| self.engine.schedule().puzzle_number(date).ok());
        self.input_buffer.clear();

        let errors = self.engine.drain_storage_errors();
        self.report_storage_errors(&errors);

        if self.session.is_finished() {
            self.input_mode = InputMode::Finished;
            self.add_message(
                "You already played this puzzle. Press 'p' to practice.",
                MessageStyle::Info,
            );
        } else {
            self.input_mode = InputMode::Guessing;
            let text = format!(
                "Guess the {}-letter word in {} tries",
                self.session.word_length(),
                self.session.max_guesses()
            );
            self.add_message(&text, MessageStyle::Info);
        }
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Guessing => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                    if self.input_buffer.len() < self.session.word_length() {
                        self.input_buffer.push(c.to_ascii_lowercase());
                    }
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => self.submit_input(),
                _ => {}
            },
            InputMode::Finished => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('p' | 'n') => self.new_practice(),
                _ => {}
            },
        }
    }

    pub fn submit_input(&mut self) {
        if self.input_buffer.len() < self.session.word_length() {
            self.add_message("Not enough letters", MessageStyle::Error);
            return;
        }

        let guess = self.input_buffer.clone();
        match self.engine.submit(&mut self.session, &guess) {
            Ok(turn) => {
                self.input_buffer.clear();
                self.report_storage_errors(&turn.storage_errors);
                match turn.status {
                    GameStatus::InProgress => {}
                    GameStatus::Won => self.finish_won(),
                    GameStatus::Lost => self.finish_lost(),
                }
            }
            Err(EngineError::InvalidGuess(reason)) => {
                self.add_message(&capitalize(&reason.to_string()), MessageStyle::Error);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn finish_won(&mut self) {
        self.input_mode = InputMode::Finished;
        let celebration = match self.session.history().len() {
            1 => "🎯 HOLE IN ONE! Extraordinary!",
            2 => "🔥 MAGNIFICENT! Two guesses!",
            3 => "✨ SPLENDID! Three guesses!",
            4 => "👏 GREAT JOB! Four guesses!",
            5 => "🎉 NICE WORK! Five guesses!",
            _ => "😅 PHEW! Got it!",
        };
        self.add_message(celebration, MessageStyle::Success);
        self.add_message("Press 'p' to practice or 'q' to quit.", MessageStyle::Info);
    }

    fn finish_lost(&mut self) {
        self.input_mode = InputMode::Finished;
        let text = match self.session.reveal_secret() {
            Ok(secret) => format!("The word was {}", secret.text().to_uppercase()),
            Err(e) => e.to_string(),
        };
        self.add_message(&text, MessageStyle::Error);
        self.add_message("Press 'p' to practice or 'q' to quit.", MessageStyle::Info);
    }

    pub fn new_practice(&mut self) {
        match self.engine.start_practice() {
            Ok(session) => {
                self.session = session;
                self.messages.clear();
                self.add_message("Practice game: not counted in stats", MessageStyle::Info);
                self.begin();
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Share grid once the game is over
    #[must_use]
    pub fn share(&self) -> Option<String> {
        self.session
            .is_finished()
            .then(|| share_text(&self.session, self.puzzle_number))
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    fn report_storage_errors(&mut self, errors: &[StorageError]) {
        for error in errors {
            self.add_message(&error.user_message(), MessageStyle::Warning);
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: Storage>(app: App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Leave the share grid on the normal screen
    if let Some(share) = res?.share() {
        println!("{share}");
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: Storage>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
) -> Result<App<S>> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(app)
}
