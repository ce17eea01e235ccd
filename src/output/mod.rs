//! Terminal output formatting
//!
//! Coloured tiles, share grids and pretty-printed command results.

pub mod display;
pub mod formatters;

pub use display::{print_guess_result, print_stats, print_today};
pub use formatters::share_text;
