//! Word list parsing
//!
//! Word lists are plain text: one word per line, surrounding whitespace
//! ignored, blank lines and `#` comments skipped. Anything else that is not a
//! valid word is an error; entries are never dropped silently.

use crate::core::Word;
use crate::error::ValidationError;

/// Parse the text of a word list
///
/// # Errors
///
/// Returns `ValidationError::InvalidWord` for the first malformed entry.
///
/// # Examples
/// ```
/// use lingle::wordlists::loader::parse_word_list;
///
/// let words = parse_word_list("# answers\ncrane\n\nSLATE\n").unwrap();
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[1].text(), "slate");
/// ```
pub fn parse_word_list(content: &str) -> Result<Vec<Word>, ValidationError> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_entry)
        .collect()
}

/// Convert an embedded string slice to words
///
/// # Errors
///
/// Returns `ValidationError::InvalidWord` for the first malformed entry.
///
/// # Examples
/// ```
/// use lingle::wordlists::loader::words_from_slice;
/// use lingle::wordlists::ANSWERS;
///
/// let words = words_from_slice(ANSWERS).unwrap();
/// assert_eq!(words.len(), ANSWERS.len());
/// ```
pub fn words_from_slice(slice: &[&str]) -> Result<Vec<Word>, ValidationError> {
    slice.iter().map(|s| parse_entry(s)).collect()
}

fn parse_entry(entry: &str) -> Result<Word, ValidationError> {
    Word::new(entry).map_err(|source| ValidationError::InvalidWord {
        word: entry.to_string(),
        source,
    })
}
