//! Address Validation
//!
//! Minimal well-formedness checks over the normalized string. The basic
//! mode only guards against empty/garbage input - it deliberately does not
//! require a house number or a dictionary match. The strict mode adds a
//! dictionary-membership requirement for callers that prefer rejects over
//! placeholder-filled records.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dictionary::ReferenceDictionary;

/// Normalized strings shorter than this are rejected.
pub const MIN_ADDRESS_LEN: usize = 3;

static CYRILLIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[а-яё]").unwrap());

/// Row-level rejection reasons. Rendered messages end up in
/// `AddressRecord::error_message`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("address too short after normalization")]
    TooShort,

    #[error("address contains no place or street name")]
    MissingName,

    #[error("address matches no known dictionary entry")]
    NoDictionaryMatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Length and alphabet checks only
    #[default]
    Basic,
    /// Additionally require a canonical dictionary entry in the address
    Strict,
}

/// Well-formedness validator over the reference dictionary.
pub struct Validator<'a> {
    dictionary: &'a ReferenceDictionary,
    mode: ValidationMode,
}

impl<'a> Validator<'a> {
    pub fn new(dictionary: &'a ReferenceDictionary, mode: ValidationMode) -> Self {
        Self { dictionary, mode }
    }

    /// Check one normalized address.
    pub fn validate(&self, normalized: &str) -> Result<(), ValidationError> {
        if normalized.chars().count() < MIN_ADDRESS_LEN {
            return Err(ValidationError::TooShort);
        }
        if !CYRILLIC_RE.is_match(normalized) {
            return Err(ValidationError::MissingName);
        }
        if self.mode == ValidationMode::Strict && !self.dictionary.contains_canonical(normalized) {
            return Err(ValidationError::NoDictionaryMatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn validator(dict: &ReferenceDictionary, mode: ValidationMode) -> Validator<'_> {
        Validator::new(dict, mode)
    }

    #[rstest]
    #[case("", ValidationError::TooShort)]
    #[case("X", ValidationError::TooShort)]
    #[case("ул", ValidationError::TooShort)]
    #[case("12345", ValidationError::MissingName)]
    #[case("abc def", ValidationError::MissingName)]
    fn test_basic_rejections(#[case] input: &str, #[case] expected: ValidationError) {
        let dict = ReferenceDictionary::builtin();
        let v = validator(&dict, ValidationMode::Basic);
        assert_eq!(v.validate(input).unwrap_err(), expected);
    }

    #[test]
    fn test_basic_accepts_any_cyrillic_text() {
        let dict = ReferenceDictionary::builtin();
        let v = validator(&dict, ValidationMode::Basic);
        assert!(v.validate("Москва, ул. Ленина д. 10").is_ok());
        // No dictionary requirement in basic mode
        assert!(v.validate("тарабарщина").is_ok());
    }

    #[test]
    fn test_strict_requires_dictionary_entry() {
        let dict = ReferenceDictionary::builtin();
        let v = validator(&dict, ValidationMode::Strict);
        assert!(v.validate("г. Москва, ул. Ленина д. 10").is_ok());
        assert_eq!(
            v.validate("тарабарщина").unwrap_err(),
            ValidationError::NoDictionaryMatch
        );
    }

    #[test]
    fn test_error_messages_render() {
        assert_eq!(
            ValidationError::TooShort.to_string(),
            "address too short after normalization"
        );
    }
}
