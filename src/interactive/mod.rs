//! Interactive TUI
//!
//! A ratatui front end over [`crate::game::Engine`]: board, on-screen
//! keyboard, stats and a share grid once the game is over.

mod app;
mod rendering;

pub use app::{App, InputMode, Message, MessageStyle, run_tui};
pub use rendering::ui;
