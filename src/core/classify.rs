//! Component and Accuracy Classification
//!
//! Assigns each comma/semicolon fragment of a normalized address to a
//! semantic role via a fixed-priority rule cascade, and derives one overall
//! accuracy tier for the whole string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize::split_fragments;
use super::record::AddressComponents;

// ============================================================================
// Fragment patterns
// ============================================================================

// Covers both the raw marker and the canonical forms the expander
// produces ("обл" → "область", "мо" → "Московская область")
static REGION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bобл(?:асть)?\b|\bкрай\b|\bреспублика\b").unwrap());
// Settlement markers other than "д." (деревня), which needs a look-ahead
static SETTLEMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:п|с|х|село)\b").unwrap());
static SETTLEMENT_D_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bд\b").unwrap());
static HOUSE_NUMBER_AHEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bд\.?\s*\d").unwrap());
static STREET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ул\.|улица|пр\.|проспект|пер\.|переулок|ш\.|шоссе|бул\.|бульвар|наб\.|набережная|пл\.|площадь")
        .unwrap()
});
static HOUSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)д\.|дом|корп\.|стр\.").unwrap());
static HOUSE_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:д\.|дом)\s*(\d+[a-zа-я]?)").unwrap());
static APARTMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)кв\.|квартира|оф\.|офис").unwrap());
static APARTMENT_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:кв\.|квартира|оф\.|офис)\s*(\d+)").unwrap());
static CITY_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^г\.|город").unwrap());
static CITY_PREFIX_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^г\.\s*|город\s*").unwrap());
static DISTRICT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)район|р-н|муниципалитет|округ").unwrap());

// ============================================================================
// Component rules
// ============================================================================

/// One step of the classification cascade. Order in [`RULES`] is the
/// tie-break order: the first matching rule claims the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRule {
    Region,
    Settlement,
    Street,
    House,
    Apartment,
    CityPrefix,
    District,
    CatchAll,
}

/// The cascade, highest priority first.
pub const RULES: &[ComponentRule] = &[
    ComponentRule::Region,
    ComponentRule::Settlement,
    ComponentRule::Street,
    ComponentRule::House,
    ComponentRule::Apartment,
    ComponentRule::CityPrefix,
    ComponentRule::District,
    ComponentRule::CatchAll,
];

impl ComponentRule {
    /// Does this rule claim the fragment, given the components gathered so
    /// far? Only `CatchAll` inspects prior state.
    fn matches(self, fragment: &str, acc: &AddressComponents) -> bool {
        match self {
            Self::Region => REGION_RE.is_match(fragment),
            // "д." marks a settlement (деревня) only when no number follows;
            // "д. 5" falls through to the house rule
            Self::Settlement => {
                SETTLEMENT_RE.is_match(fragment)
                    || (SETTLEMENT_D_RE.is_match(fragment)
                        && !HOUSE_NUMBER_AHEAD_RE.is_match(fragment))
            }
            Self::Street => STREET_RE.is_match(fragment),
            Self::House => HOUSE_RE.is_match(fragment),
            Self::Apartment => APARTMENT_RE.is_match(fragment),
            Self::CityPrefix => CITY_PREFIX_RE.is_match(fragment),
            Self::District => DISTRICT_RE.is_match(fragment),
            Self::CatchAll => {
                acc.settlement.is_none()
                    && acc.region.is_none()
                    && fragment.chars().count() > 2
            }
        }
    }

    /// Populate the matching component slot. Assignment overwrites: a later
    /// fragment claiming the same slot replaces the earlier value.
    fn apply(self, fragment: &str, acc: &mut AddressComponents) {
        match self {
            Self::Region => acc.region = Some(fragment.to_string()),
            Self::Settlement | Self::CatchAll => acc.settlement = Some(fragment.to_string()),
            Self::Street => acc.street = Some(fragment.to_string()),
            Self::House => {
                if let Some(caps) = HOUSE_VALUE_RE.captures(fragment) {
                    acc.house = Some(caps[1].to_string());
                }
            }
            Self::Apartment => {
                if let Some(caps) = APARTMENT_VALUE_RE.captures(fragment) {
                    acc.apartment = Some(caps[1].to_string());
                }
            }
            Self::CityPrefix => {
                let stripped = CITY_PREFIX_STRIP_RE.replace_all(fragment, "");
                acc.settlement = Some(stripped.trim().to_string());
            }
            Self::District => acc.municipal_district = Some(fragment.to_string()),
        }
    }
}

/// Decompose a normalized address into components.
///
/// Fragments are classified independently; a fragment matching no rule is
/// dropped.
pub fn parse_components(normalized: &str) -> AddressComponents {
    let mut acc = AddressComponents::default();
    for fragment in split_fragments(normalized) {
        if let Some(rule) = RULES.iter().find(|r| r.matches(fragment, &acc)) {
            rule.apply(fragment, &mut acc);
        }
    }
    acc
}

// ============================================================================
// Accuracy classification
// ============================================================================

static ACCURACY_APARTMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)кв\.?\s*\d+|квартира\s*\d+|оф\.?\s*\d+|офис\s*\d+").unwrap());
static ACCURACY_HOUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)д\.?\s*\d+[a-zа-я]?|дом\s*\d+|корп\.?\s*\d+|стр\.?\s*\d+").unwrap());

/// Coarse precision tier of a normalized address, finest detected wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyLevel {
    Street,
    House,
    Apartment,
}

impl AccuracyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::House => "house",
            Self::Apartment => "apartment",
        }
    }

    /// Classify the normalized string. Strict priority: apartment pattern,
    /// then house pattern, then street keyword, defaulting to street.
    pub fn classify(normalized: &str) -> Self {
        if ACCURACY_APARTMENT_RE.is_match(normalized) {
            Self::Apartment
        } else if ACCURACY_HOUSE_RE.is_match(normalized) {
            Self::House
        } else {
            Self::Street
        }
    }
}
