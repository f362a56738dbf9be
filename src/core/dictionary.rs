//! Reference Dictionary
//!
//! Immutable set of canonical place/street names plus two lookup maps:
//! abbreviation → canonical city/region name and common misspelling →
//! canonical word. Built once at startup and shared read-only by every
//! row-processing call.

use indexmap::IndexMap;

// ============================================================================
// Constants - Abbreviation Expansions
// ============================================================================

/// City abbreviations and their canonical names.
///
/// Insertion order is application order; longer keys sit before their
/// prefixes so "москва" is tried before "моск" and "мск".
const CITY_ABBREVIATIONS: &[(&str, &str)] = &[
    // Москва
    ("москва", "Москва"),
    ("моск", "Москва"),
    ("мск", "Москва"),
    // Санкт-Петербург
    ("санкт-петербург", "Санкт-Петербург"),
    ("ленинград", "Санкт-Петербург"),
    ("питер", "Санкт-Петербург"),
    ("спб", "Санкт-Петербург"),
    // Остальные города
    ("нижний новгород", "Нижний Новгород"),
    ("н.новгород", "Нижний Новгород"),
    ("нн", "Нижний Новгород"),
    ("красноярск", "Красноярск"),
    ("краснояр", "Красноярск"),
    ("екатеринбург", "Екатеринбург"),
    ("екат", "Екатеринбург"),
    ("екб", "Екатеринбург"),
    ("новосибирск", "Новосибирск"),
    ("казань", "Казань"),
    ("челябинск", "Челябинск"),
    ("самара", "Самара"),
    ("омск", "Омск"),
    ("ростов-на-дону", "Ростов-на-Дону"),
    ("ростов", "Ростов-на-Дону"),
    ("уфа", "Уфа"),
    ("воронеж", "Воронеж"),
    ("пермь", "Пермь"),
    ("волгоград", "Волгоград"),
];

/// Region abbreviations and their canonical names.
const REGION_NAMES: &[(&str, &str)] = &[
    ("московская область", "Московская область"),
    ("московская обл", "Московская область"),
    ("мо", "Московская область"),
    ("ленинградская область", "Ленинградская область"),
    ("ло", "Ленинградская область"),
    ("свердловская область", "Свердловская область"),
    ("новосибирская область", "Новосибирская область"),
    ("республика татарстан", "Республика Татарстан"),
    ("татарстан", "Республика Татарстан"),
    ("красноярский край", "Красноярский край"),
];

/// Common misspellings and long forms mapped to the canonical word.
///
/// The word map is applied to a fixed point, so a chain like
/// "шосс" → "шоссе" → "ш." resolves within a single normalization pass.
const SPELLING_CORRECTIONS: &[(&str, &str)] = &[
    // Падежные формы городов
    ("москва", "Москва"),
    ("москвы", "Москва"),
    ("москве", "Москва"),
    ("москву", "Москва"),
    ("спб", "Санкт-Петербург"),
    // Полные типы улиц → сокращения
    ("улица", "ул."),
    ("проспект", "пр."),
    ("переулок", "пер."),
    ("шоссе", "ш."),
    ("бульвар", "бул."),
    ("набережная", "наб."),
    ("площадь", "пл."),
    // Полные слова → сокращения
    ("дом", "д."),
    ("корпус", "корп."),
    ("строение", "стр."),
    ("квартира", "кв."),
    ("офис", "оф."),
    // Обрезанные опечатки
    ("шосс", "шоссе"),
    ("площ", "площадь"),
    ("бульв", "бульвар"),
    ("набер", "набережная"),
];

// ============================================================================
// Constants - Canonical Entries
// ============================================================================

/// Canonical address database: regions, cities, landmark streets and
/// street-type words. The fuzzy index is built over this list.
const CANONICAL_ENTRIES: &[&str] = &[
    // Области и регионы
    "Московская область",
    "Ленинградская область",
    "Свердловская область",
    "Новосибирская область",
    "Республика Татарстан",
    "Красноярский край",
    // Города
    "г. Москва",
    "г. Санкт-Петербург",
    "г. Екатеринбург",
    "г. Новосибирск",
    "г. Казань",
    "г. Нижний Новгород",
    "г. Челябинск",
    "г. Самара",
    "г. Омск",
    "г. Ростов-на-Дону",
    "г. Уфа",
    "г. Красноярск",
    "г. Воронеж",
    "г. Пермь",
    "г. Волгоград",
    // Известные улицы
    "ул. Ленина",
    "ул. Советская",
    "ул. Мира",
    "ул. Кирова",
    "ул. Молодежная",
    "Невский проспект",
    "ул. Тверская",
    "ул. Арбат",
    "ул. Малышева",
    "ул. Красная",
    "проспект Мира",
    "Красная площадь",
    "ул. Гагарина",
    "ул. Пушкина",
    "ул. Лермонтова",
    // Типы улиц
    "переулок",
    "проспект",
    "площадь",
    "бульвар",
    "набережная",
    "шоссе",
    "тракт",
    "линия",
];

// ============================================================================
// Defaults
// ============================================================================

/// Placeholder values substituted for unresolved components.
///
/// A "never show empty cells" policy; the record assembler flags which
/// components were defaulted so stricter consumers can filter them out.
#[derive(Debug, Clone)]
pub struct ComponentDefaults {
    pub region: &'static str,
    pub municipal_district: &'static str,
    pub settlement: &'static str,
    pub street: &'static str,
    pub house: &'static str,
    pub apartment: &'static str,
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self {
            region: "Москва",
            municipal_district: "-",
            settlement: "Москва",
            street: "ул. Примерная",
            house: "1",
            apartment: "-",
        }
    }
}

// ============================================================================
// Reference Dictionary
// ============================================================================

/// Canonical names and lookup maps for address normalization.
///
/// Immutable for the process lifetime. `IndexMap` preserves insertion
/// order, so the substitution order of the maps above is an explicit,
/// testable artifact rather than incidental hash ordering.
#[derive(Debug, Clone)]
pub struct ReferenceDictionary {
    canonical_entries: Vec<&'static str>,
    city_abbreviations: IndexMap<&'static str, &'static str>,
    region_names: IndexMap<&'static str, &'static str>,
    spelling_corrections: IndexMap<&'static str, &'static str>,
    defaults: ComponentDefaults,
}

impl ReferenceDictionary {
    /// Build the built-in dictionary.
    pub fn builtin() -> Self {
        Self {
            canonical_entries: CANONICAL_ENTRIES.to_vec(),
            city_abbreviations: CITY_ABBREVIATIONS.iter().copied().collect(),
            region_names: REGION_NAMES.iter().copied().collect(),
            spelling_corrections: SPELLING_CORRECTIONS.iter().copied().collect(),
            defaults: ComponentDefaults::default(),
        }
    }

    /// Canonical entries the fuzzy index is built over.
    pub fn canonical_entries(&self) -> &[&'static str] {
        &self.canonical_entries
    }

    /// City abbreviation → canonical name map, in application order.
    pub fn city_abbreviations(&self) -> &IndexMap<&'static str, &'static str> {
        &self.city_abbreviations
    }

    /// Region abbreviation → canonical name map, in application order.
    pub fn region_names(&self) -> &IndexMap<&'static str, &'static str> {
        &self.region_names
    }

    /// Misspelling → canonical word map, in application order.
    pub fn spelling_corrections(&self) -> &IndexMap<&'static str, &'static str> {
        &self.spelling_corrections
    }

    /// Placeholder values for unresolved components.
    pub fn defaults(&self) -> &ComponentDefaults {
        &self.defaults
    }

    /// Case-insensitive membership test against the canonical entries.
    /// Used by the strict validation mode.
    pub fn contains_canonical(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.canonical_entries
            .iter()
            .any(|entry| lower.contains(&entry.to_lowercase()))
    }
}

impl Default for ReferenceDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
