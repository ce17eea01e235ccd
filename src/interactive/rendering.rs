//! TUI rendering with ratatui
//!
//! Board on the left; keyboard, stats and messages on the right.

use super::app::{App, InputMode, MessageStyle};
use crate::core::LetterFeedback;
use crate::output::formatters::{KEYBOARD_ROWS, puzzle_title};
use crate::storage::Storage;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::collections::BTreeMap;

/// Main UI rendering function
pub fn ui<S: Storage>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Board
            Constraint::Percentage(55), // Side panel
        ])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn feedback_style(feedback: LetterFeedback) -> Style {
    let bg = match feedback {
        LetterFeedback::Correct => Color::Green,
        LetterFeedback::Present => Color::Yellow,
        LetterFeedback::Absent => Color::DarkGray,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn tile(letter: char, style: Style) -> Span<'static> {
    Span::styled(format!(" {} ", letter.to_ascii_uppercase()), style)
}

fn render_header<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let mut title = format!("🟩 {}", puzzle_title(app.session.kind(), app.puzzle_number));
    if app.session.rules().hard_mode {
        title.push_str(" · hard mode");
    }

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let session = &app.session;
    let width = session.word_length();
    let empty = Style::default().fg(Color::DarkGray);
    let typing = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from("")];
    for result in session.history() {
        let spans: Vec<Span> = result
            .letters()
            .flat_map(|(letter, feedback)| {
                [tile(letter as char, feedback_style(feedback)), Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let remaining = session.guesses_remaining();
    for row in 0..remaining {
        let spans: Vec<Span> = (0..width)
            .flat_map(|i| {
                let typed = if row == 0 && !session.is_finished() {
                    app.input_buffer.chars().nth(i)
                } else {
                    None
                };
                let cell = typed.map_or_else(|| tile('·', empty), |c| tile(c, typing));
                [cell, Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_side_panel<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Keyboard
            Constraint::Length(3), // Win rate gauge
            Constraint::Min(4),    // Stats or share grid
            Constraint::Length(8), // Messages
        ])
        .split(area);

    render_keyboard(f, &app.session.letter_states(), chunks[0]);
    render_win_rate(f, app, chunks[1]);
    if let Some(share) = app.share() {
        render_share(f, &share, chunks[2]);
    } else {
        render_distribution(f, app, chunks[2]);
    }
    render_messages(f, app, chunks[3]);
}

fn render_keyboard(f: &mut Frame, states: &BTreeMap<u8, LetterFeedback>, area: Rect) {
    let unknown = Style::default().fg(Color::White);
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .bytes()
                .map(|letter| {
                    let style = states.get(&letter).map_or(unknown, |&fb| feedback_style(fb));
                    tile(letter as char, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(keyboard, area);
}

fn render_win_rate<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let stats = app.engine.stats();
    // Cast is safe: percentage is within [0, 100]
    let percent = stats.win_percentage().round().clamp(0.0, 100.0) as u16;

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Win Rate ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent)
        .label(format!(
            "{percent}% of {} | streak {} (best {})",
            stats.games_played, stats.current_streak, stats.max_streak
        ));
    f.render_widget(gauge, area);
}

fn render_distribution<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let stats = app.engine.stats();
    let most = stats.guess_distribution.values().copied().max().unwrap_or(0);
    let bar_width = usize::from(area.width.saturating_sub(12));

    let lines: Vec<Line> = (1..=app.session.max_guesses())
        .map(|guesses| {
            let count = stats.wins_in(guesses);
            let filled = if most == 0 {
                0
            } else {
                // Cast is safe: count <= most, so the result is <= bar_width
                (count as usize * bar_width) / most as usize
            };
            Line::from(vec![
                Span::raw(format!("{guesses:>2} ")),
                Span::styled("█".repeat(filled.max(1)), Style::default().fg(Color::Green)),
                Span::raw(format!(" {count}")),
            ])
        })
        .collect();

    let chart = Paragraph::new(lines).block(
        Block::default()
            .title(" Guess Distribution ")
            .borders(Borders::ALL),
    );
    f.render_widget(chart, area);
}

fn render_share(f: &mut Frame, share: &str, area: Rect) {
    let share = Paragraph::new(share.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Share ")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Green)),
        );
    f.render_widget(share, area);
}

fn render_messages<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Warning => Style::default().fg(Color::Yellow),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::Guessing => (
            " Type your guess | Enter to submit ",
            app.input_buffer.to_uppercase(),
            Color::Yellow,
        ),
        InputMode::Finished => (
            " Game over | 'p' practice, 'q' quit ",
            String::new(),
            Color::Green,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status<S: Storage>(f: &mut Frame, app: &App<S>, area: Rect) {
    let help = match app.input_mode {
        InputMode::Guessing => format!(
            "{} guesses left | Esc: Quit | Backspace: Delete",
            app.session.guesses_remaining()
        ),
        InputMode::Finished => "p: Practice | q: Quit".to_string(),
    };

    let status = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GameChoice;
    use crate::config::Settings;
    use crate::game::{DateKey, Engine};
    use crate::storage::{MemoryStore, WordLists};
    use crate::wordlists::loader::words_from_slice;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App<MemoryStore> {
        let words = words_from_slice(&["crane", "slate", "audio"]).unwrap();
        let store = MemoryStore::new().with_word_lists(WordLists {
            answers: words.clone(),
            acceptable: words,
        });
        let epoch = DateKey::from_ymd(2024, 1, 1).unwrap();
        let settings = Settings {
            epoch,
            ..Settings::default()
        };
        let engine = Engine::open(store, &settings).unwrap();
        App::new(engine, GameChoice::Daily(epoch.plus_days(5))).unwrap()
    }

    fn draw(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_title_and_panels() {
        let screen = draw(&app());
        assert!(screen.contains("Lingle #5"));
        assert!(screen.contains("Keyboard"));
        assert!(screen.contains("Guess Distribution"));
        assert!(screen.contains("6 guesses left"));
    }

    #[test]
    fn renders_typed_letters_and_share_grid() {
        let mut app = app();
        app.input_buffer = "sla".to_string();
        assert!(draw(&app).contains("SLA"));

        // Day 5 of a three-word schedule is "audio"
        app.input_buffer = "audio".to_string();
        app.submit_input();
        let screen = draw(&app);
        assert!(screen.contains("Share"));
        assert!(screen.contains("Game over"));
    }
}
