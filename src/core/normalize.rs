//! Segmentation and Normalization
//!
//! Splits raw address strings into fragments, expands abbreviations via the
//! reference dictionary maps, normalizes letter case and standardizes the
//! spacing of numeric ranges and street/house abbreviations.
//!
//! Stage order within [`Normalizer::apply`]:
//! 1. abbreviation expansion (city map, then region map)
//! 2. misspelling map, applied to a fixed point
//! 3. case normalization (lowercase, then capitalize word initials)
//! 4. format rules (whitespace, `N - M` → `N-M`, abbreviation spacing)
//!
//! The whole pass is a fixed point: `apply(apply(x)) == apply(x)`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dictionary::ReferenceDictionary;

/// Word-map substitutions loop at most this many passes before settling.
/// Chains in the built-in maps are at most two hops ("шосс" → "шоссе" → "ш.").
const MAX_WORD_MAP_PASSES: usize = 4;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NUMERIC_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").unwrap());
static ABBREV_SPACING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(д|ул|пр|пл|наб)\.\s*").unwrap());

/// Split an address into trimmed, non-empty fragments on commas/semicolons.
pub fn split_fragments(address: &str) -> Vec<&str> {
    address
        .split([',', ';'])
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Split an address into tokens on commas and whitespace.
/// Used by the spelling corrector; noise tokens are filtered by length there.
pub fn split_tokens(address: &str) -> Vec<&str> {
    address
        .split([',', ' ', '\t'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// One compiled whole-word substitution rule.
struct WordRule {
    pattern: Regex,
    canonical: String,
}

/// Case/format normalizer and abbreviation expander over the dictionary maps.
pub struct Normalizer {
    city_rules: Vec<WordRule>,
    region_rules: Vec<WordRule>,
    spelling_rules: Vec<WordRule>,
}

impl Normalizer {
    /// Compile the dictionary maps into whole-word substitution rules.
    pub fn new(dictionary: &ReferenceDictionary) -> Self {
        Self {
            city_rules: compile_rules(dictionary.city_abbreviations().iter()),
            region_rules: compile_rules(dictionary.region_names().iter()),
            spelling_rules: compile_rules(dictionary.spelling_corrections().iter()),
        }
    }

    /// Run the full normalization pass.
    pub fn apply(&self, address: &str) -> String {
        let mut text = address.trim().to_string();
        text = self.expand_abbreviations(&text);
        text = self.correct_known_words(&text);
        text = normalize_caps(&text);
        normalize_format(&text)
    }

    /// Replace whole-word city/region abbreviations with canonical names.
    ///
    /// A substitution is skipped when its canonical value is already present
    /// in the text (case-insensitive). Without the guard, the shorter keys
    /// would re-match inside a canonical value inserted by an earlier rule
    /// ("Ростов-на-Дону" would grow a second "-на-Дону").
    pub fn expand_abbreviations(&self, address: &str) -> String {
        let mut text = address.to_string();
        for rule in self.city_rules.iter().chain(self.region_rules.iter()) {
            apply_rule_guarded(&mut text, rule);
        }
        text
    }

    /// Apply the misspelling map to a fixed point.
    pub fn correct_known_words(&self, address: &str) -> String {
        let mut text = address.to_string();
        for _ in 0..MAX_WORD_MAP_PASSES {
            let mut changed = false;
            for rule in &self.spelling_rules {
                let replaced = rule.pattern.replace_all(&text, rule.canonical.as_str());
                if replaced != text {
                    text = replaced.into_owned();
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        text
    }
}

fn compile_rules<'a, I>(entries: I) -> Vec<WordRule>
where
    I: Iterator<Item = (&'a &'static str, &'a &'static str)>,
{
    entries
        .map(|(key, canonical)| WordRule {
            // Keys are whole-word anchored; `.` inside keys is escaped.
            pattern: Regex::new(&format!(r"(?i)\b{}\b", regex::escape(key)))
                .expect("escaped dictionary key must compile"),
            canonical: (*canonical).to_string(),
        })
        .collect()
}

fn apply_rule_guarded(text: &mut String, rule: &WordRule) {
    if !rule.pattern.is_match(text) {
        return;
    }
    let canonical_lower = rule.canonical.to_lowercase();
    if text.to_lowercase().contains(&canonical_lower) {
        return;
    }
    *text = rule
        .pattern
        .replace_all(text, rule.canonical.as_str())
        .into_owned();
}

/// Lowercase the string, then capitalize the first letter of each word.
/// Unicode-aware; a word starts after any non-alphanumeric character.
pub fn normalize_caps(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            at_word_start = !c.is_alphanumeric();
            result.push(c);
        }
    }
    result
}

/// Whitespace, numeric-range and abbreviation-spacing rules.
///
/// "д." "ул." "пр." "пл." "наб." are forced lowercase with exactly one
/// trailing space wherever they occur as whole tokens.
pub fn normalize_format(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let ranged = NUMERIC_RANGE_RE.replace_all(&collapsed, "$1-$2");
    let spaced = ABBREV_SPACING_RE.replace_all(&ranged, |caps: &regex::Captures| {
        format!("{}. ", caps[1].to_lowercase())
    });
    WHITESPACE_RE.replace_all(&spaced, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn normalizer() -> Normalizer {
        Normalizer::new(&ReferenceDictionary::builtin())
    }

    #[test]
    fn test_split_fragments() {
        assert_eq!(
            split_fragments("Москва, ул. Ленина; д. 10"),
            vec!["Москва", "ул. Ленина", "д. 10"]
        );
        assert_eq!(split_fragments("  ,, ; "), Vec::<&str>::new());
        assert_eq!(split_fragments(""), Vec::<&str>::new());
    }

    #[test]
    fn test_normalize_caps() {
        assert_eq!(normalize_caps("МОСКВА"), "Москва");
        assert_eq!(normalize_caps("ул. ленина"), "Ул. Ленина");
        // Digit-adjacent letters are not word starts
        assert_eq!(normalize_caps("д. 10а"), "Д. 10а");
    }

    #[rstest]
    #[case("ул.Ленина", "ул. Ленина")]
    #[case("д.10", "д. 10")]
    #[case("дома  10 - 12", "Дома 10-12")]
    #[case("  НАБ.  реки  ", "наб. Реки")]
    fn test_format_rules(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalizer().apply(input), expected);
    }

    #[test]
    fn test_expand_whole_word_only() {
        let n = normalizer();
        assert_eq!(n.apply("мск"), "Москва");
        // Not a whole-word match
        assert_eq!(n.apply("смск"), "Смск");
    }

    #[test]
    fn test_expand_guard_prevents_reinsertion() {
        let n = normalizer();
        // Hyphen-separated words are re-capitalized by the caps pass
        assert_eq!(n.apply("ростов"), "Ростов-На-Дону");
        // Second pass must not grow the name again
        let once = n.apply("ростов");
        assert_eq!(n.apply(&once), once);
    }

    #[test]
    fn test_word_map_chain_settles() {
        // "шосс" → "шоссе" → "ш." within one pass
        let n = normalizer();
        assert_eq!(n.apply("шосс"), "Ш.");
    }

    #[rstest]
    #[case("Москва, ул. Ленина д. 10")]
    #[case("мск кв 5")]
    #[case("СПб, Невский проспект, дом 1")]
    #[case("московская обл, г. Балашиха, улица мира д.3 кв.7")]
    #[case("екб, ул. малышева 10 - 12")]
    fn test_apply_is_idempotent(#[case] input: &str) {
        let n = normalizer();
        let once = n.apply(input);
        assert_eq!(n.apply(&once), once);
    }

    #[test]
    fn test_long_street_forms_abbreviated() {
        let n = normalizer();
        let out = n.apply("улица Ленина дом 5 квартира 7");
        // "кв." is not in the trailing-space abbreviation set, so the caps
        // pass leaves it capitalized
        assert_eq!(out, "ул. Ленина д. 5 Кв. 7");
    }
}
