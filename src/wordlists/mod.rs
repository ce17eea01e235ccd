//! Word lists and the word bank
//!
//! Provides the embedded default lists compiled into the binary, the text
//! format parser shared with custom lists on disk, and [`WordBank`].

mod bank;
mod embedded;
pub mod loader;

pub use bank::{BankHandle, WordBank};
pub use embedded::{ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT};
