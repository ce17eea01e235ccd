//! Lingle
//!
//! A daily word-guessing puzzle: guess the secret word in a limited number
//! of tries, with per-letter feedback after every guess.
//!
//! # Quick Start
//!
//! ```rust
//! use lingle::config::Settings;
//! use lingle::game::{DateKey, Engine, GameStatus};
//! use lingle::storage::MemoryStore;
//!
//! let mut engine = Engine::open(MemoryStore::new(), &Settings::default()).unwrap();
//! let date = DateKey::from_ymd(2021, 6, 19).unwrap();
//! let mut session = engine.start_daily(date).unwrap();
//!
//! let turn = engine.submit(&mut session, "crane").unwrap();
//! assert_eq!(turn.status, GameStatus::Won);
//! assert_eq!(engine.stats().games_won, 1);
//! ```

// Core domain types
pub mod core;

// Error types
pub mod error;

// Settings and data directory
pub mod config;

// Subscriber setup for the binary
pub mod logging;

// Word lists
pub mod wordlists;

// Schedule, sessions, stats and the engine
pub mod game;

// Persistence
pub mod storage;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

pub use error::{EngineError, Result};
