//! Fuzzy Index
//!
//! Read-only approximate lookup over the reference dictionary using
//! Jaro-Winkler similarity. Built once, shared by all rows.

use strsim::jaro_winkler;

use super::dictionary::ReferenceDictionary;

/// Tokens shorter than this are never looked up, to avoid matching noise.
pub const MIN_TOKEN_LEN: usize = 3;

/// Best approximate match for a token.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Canonical dictionary entry
    pub canonical: String,
    /// Jaro-Winkler similarity in [0, 1]
    pub score: f64,
    /// Monotonic transform of the score into 0..=100
    pub confidence: u32,
}

/// One indexed entry: the dictionary's casing plus the lowercased form
/// the scorer compares against.
struct IndexEntry {
    canonical: String,
    lowered: String,
}

/// Approximate string lookup over the canonical entries.
pub struct FuzzyIndex {
    entries: Vec<IndexEntry>,
}

impl FuzzyIndex {
    /// Build the index over the dictionary's canonical entries.
    /// Scoring is case-insensitive; matches report the dictionary casing.
    pub fn new(dictionary: &ReferenceDictionary) -> Self {
        Self {
            entries: dictionary
                .canonical_entries()
                .iter()
                .map(|e| IndexEntry {
                    canonical: e.to_string(),
                    lowered: e.to_lowercase(),
                })
                .collect(),
        }
    }

    /// Find the best-scoring canonical entry for a token.
    ///
    /// Returns `None` for tokens below [`MIN_TOKEN_LEN`] or when the index
    /// is empty. A low-scoring best match is still returned; thresholding
    /// is the corrector's decision.
    pub fn best_match(&self, token: &str) -> Option<FuzzyMatch> {
        if token.chars().count() < MIN_TOKEN_LEN {
            return None;
        }

        let token_lower = token.to_lowercase();
        let mut best: Option<(usize, f64)> = None;

        for (idx, entry) in self.entries.iter().enumerate() {
            let score = jaro_winkler(&token_lower, &entry.lowered);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((idx, score)),
            }
        }

        best.map(|(idx, score)| FuzzyMatch {
            canonical: self.entries[idx].canonical.clone(),
            score,
            confidence: (score * 100.0).round() as u32,
        })
    }
}
