//! Core domain types
//!
//! Words and guess feedback. Everything here is pure: no I/O, no global
//! state, no knowledge of sessions or schedules.

mod feedback;
mod word;

pub use feedback::{GuessResult, LetterFeedback, evaluate};
pub use word::{Word, WordError};
