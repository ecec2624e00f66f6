//! Customer name validation.

use super::ValidationOutcome;
use crate::domain::{FieldInput, ValidationError};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;

/// Sequences that never appear in a real name but do appear in SQL injection.
const FORBIDDEN_SEQUENCES: [&str; 4] = ["--", "/*", "*/", ";"];

/// Whole words rejected regardless of case.
const FORBIDDEN_WORDS: [&str; 3] = ["drop", "delete", "union"];

/// Validate a customer name.
///
/// Checks run in order and the first failure wins: type, length (2..=100
/// characters after trimming), character set (letters, spaces, hyphens,
/// apostrophes), forbidden sequences and words, at least one letter.
/// On success the trimmed name is returned.
pub fn validate_name(input: &FieldInput) -> ValidationOutcome {
    let Some(text) = input.as_text() else {
        return ValidationOutcome::Invalid(ValidationError::NotText);
    };

    let name = text.trim();
    let len = name.chars().count();

    if len < MIN_NAME_LENGTH {
        return ValidationOutcome::Invalid(ValidationError::TooShort);
    }
    if len > MAX_NAME_LENGTH {
        return ValidationOutcome::Invalid(ValidationError::TooLong);
    }

    let allowed = name
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\''));
    if !allowed || contains_forbidden(name) {
        return ValidationOutcome::Invalid(ValidationError::InvalidCharacters);
    }

    if !name.chars().any(char::is_alphabetic) {
        return ValidationOutcome::Invalid(ValidationError::MustContainLetters);
    }

    ValidationOutcome::Valid(name.to_string())
}

fn contains_forbidden(name: &str) -> bool {
    if FORBIDDEN_SEQUENCES.iter().any(|seq| name.contains(seq)) {
        return true;
    }

    name.split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .any(|word| {
            FORBIDDEN_WORDS
                .iter()
                .any(|forbidden| word.eq_ignore_ascii_case(forbidden))
        })
}
