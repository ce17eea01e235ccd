//! Score one guess against an arbitrary secret

use crate::core::{GuessResult, Word, evaluate};
use crate::error::{Result, ValidationError};

/// Evaluate `guess` against `secret` without consulting any word list
///
/// # Errors
///
/// Returns `ValidationError` if either word is malformed or their lengths
/// differ.
pub fn score_guess(secret: &str, guess: &str) -> Result<GuessResult> {
    let secret = parse(secret)?;
    let guess = parse(guess)?;
    Ok(evaluate(&secret, &guess)?)
}

fn parse(text: &str) -> Result<Word, ValidationError> {
    Word::new(text).map_err(|source| ValidationError::InvalidWord {
        word: text.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn scores_duplicate_letters() {
        assert_eq!(score_guess("SPEED", "erase").unwrap().pattern(), "Y--YY");
        assert_eq!(score_guess("loyal", "alloy").unwrap().pattern(), "YYYYY");
    }

    #[test]
    fn any_letters_are_fine() {
        assert_eq!(score_guess("abcde", "zzzzz").unwrap().pattern(), "-----");
    }

    #[test]
    fn bad_input_is_a_validation_error() {
        assert!(matches!(
            score_guess("crane", "cr4ne"),
            Err(EngineError::Validation(ValidationError::InvalidWord { .. }))
        ));
        assert!(matches!(
            score_guess("crane", "cranes"),
            Err(EngineError::Validation(ValidationError::LengthMismatch { .. }))
        ));
    }
}
