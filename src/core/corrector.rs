//! Spelling Corrector
//!
//! Queries the fuzzy index per address token and conditionally rewrites
//! tokens that are a confident near-match to a canonical dictionary entry.
//! A token with no qualifying match is left untouched; that is never an
//! error condition.

use regex::Regex;

use super::fuzzy::{FuzzyIndex, MIN_TOKEN_LEN};
use super::normalize::{split_tokens, Normalizer};

/// A correction applied to one token of an address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Correction {
    /// Original token from the address
    pub original: String,
    /// Canonical replacement
    pub corrected: String,
    /// Match confidence, 0..=100
    pub confidence: u32,
}

/// Outcome of correcting one address string.
#[derive(Debug, Clone)]
pub struct CorrectedAddress {
    /// Address with qualifying tokens replaced
    pub text: String,
    /// Individual corrections made (for UI feedback)
    pub corrections: Vec<Correction>,
    /// Worst-case confidence over all applied corrections, 100 if none
    pub confidence: u32,
}

/// Conditional token rewriter over the fuzzy index.
pub struct SpellingCorrector<'a> {
    index: &'a FuzzyIndex,
    normalizer: &'a Normalizer,
    /// Minimum similarity score for a match to be considered at all
    score_threshold: f64,
    /// Corrections at or below this confidence never fire
    confidence_floor: u32,
}

impl<'a> SpellingCorrector<'a> {
    pub fn new(
        index: &'a FuzzyIndex,
        normalizer: &'a Normalizer,
        score_threshold: f64,
        confidence_floor: u32,
    ) -> Self {
        Self {
            index,
            normalizer,
            score_threshold,
            confidence_floor,
        }
    }

    /// Correct every qualifying token of the address.
    ///
    /// A correction is applied only if the best match clears the score
    /// threshold and the confidence floor, and the canonical string is not
    /// already present in the address (which would create a duplicate).
    /// The running confidence is the minimum over applied corrections -
    /// worst case wins.
    pub fn correct(&self, address: &str) -> CorrectedAddress {
        let mut text = address.to_string();
        let mut corrections = Vec::new();
        let mut confidence: u32 = 100;

        let tokens: Vec<String> = split_tokens(address)
            .into_iter()
            .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
            .map(str::to_string)
            .collect();

        for token in tokens {
            let Some(m) = self.index.best_match(&token) else {
                continue;
            };
            if m.score < self.score_threshold || m.confidence <= self.confidence_floor {
                continue;
            }
            if self.would_duplicate(&text, &m.canonical) {
                continue;
            }

            let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&token)))
                .expect("escaped token must compile");
            let replaced = pattern.replace_all(&text, m.canonical.as_str());
            if replaced != text {
                text = replaced.into_owned();
                confidence = confidence.min(m.confidence);
                corrections.push(Correction {
                    original: token,
                    corrected: m.canonical,
                    confidence: m.confidence,
                });
            }
        }

        CorrectedAddress {
            text,
            corrections,
            confidence,
        }
    }

    /// Would inserting the canonical string duplicate something the address
    /// already has? Checks the canonical form and its word-map rendering;
    /// the latter catches entries like "невский проспект" that the address
    /// holds in abbreviated form ("Невский пр.").
    fn would_duplicate(&self, text: &str, canonical: &str) -> bool {
        let text_lower = text.to_lowercase();
        let canonical_lower = canonical.to_lowercase();
        if text_lower.contains(&canonical_lower) {
            return true;
        }
        let mapped = self
            .normalizer
            .correct_known_words(canonical)
            .to_lowercase();
        mapped != canonical_lower && text_lower.contains(&mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::ReferenceDictionary;

    fn corrector<'a>(index: &'a FuzzyIndex, normalizer: &'a Normalizer) -> SpellingCorrector<'a> {
        SpellingCorrector::new(index, normalizer, 0.8, 85)
    }

    fn fixtures() -> (FuzzyIndex, Normalizer) {
        let dict = ReferenceDictionary::builtin();
        (FuzzyIndex::new(&dict), Normalizer::new(&dict))
    }

    #[test]
    fn test_near_match_is_corrected() {
        let (index, normalizer) = fixtures();
        let result = corrector(&index, &normalizer).correct("бульар Пугачева");
        assert_eq!(result.text, "бульвар Пугачева");
        assert_eq!(result.corrections.len(), 1);
        assert_eq!(result.corrections[0].original, "бульар");
        assert!(result.confidence > 85);
        assert!(result.confidence < 100);
    }

    #[test]
    fn test_correction_reports_dictionary_casing() {
        let (index, normalizer) = fixtures();
        let result = corrector(&index, &normalizer).correct("екатеринбург, ул. Ленина");
        assert_eq!(result.text, "г. Екатеринбург, ул. Ленина");
        assert_eq!(result.corrections[0].corrected, "г. Екатеринбург");
    }

    #[test]
    fn test_low_similarity_never_fires() {
        let (index, normalizer) = fixtures();
        let result = corrector(&index, &normalizer).correct("кзхфй водокачка");
        assert_eq!(result.text, "кзхфй водокачка");
        assert!(result.corrections.is_empty());
        assert_eq!(result.confidence, 100);
    }

    #[test]
    fn test_duplicate_guard() {
        let (index, normalizer) = fixtures();
        // "проспект" is already present; a near-miss of it elsewhere must
        // not re-insert the canonical entry
        let result = corrector(&index, &normalizer).correct("Невский проспект, просспект");
        assert_eq!(result.text, "Невский проспект, просспект");
        assert!(result.corrections.is_empty());
    }

    #[test]
    fn test_short_tokens_skipped() {
        let (index, normalizer) = fixtures();
        let result = corrector(&index, &normalizer).correct("ул д кв");
        assert_eq!(result.text, "ул д кв");
        assert!(result.corrections.is_empty());
    }

    #[test]
    fn test_worst_case_confidence_wins() {
        let (index, normalizer) = fixtures();
        let result = corrector(&index, &normalizer).correct("бульар тракт");
        for c in &result.corrections {
            assert!(result.confidence <= c.confidence);
        }
    }
}
