//! Address Records
//!
//! Output data model: per-row components, the assembled record with
//! dictionary defaults for unresolved components, and the batch result
//! collections.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::classify::AccuracyLevel;
use super::dictionary::ReferenceDictionary;

/// A row of raw cell strings, as supplied by the row-reader collaborator.
pub type RawRow = Vec<String>;
/// Ordered rows of ordered text cells.
pub type RawTable = Vec<RawRow>;

/// Confidence sentinel for a record that passed validation.
pub const FULL_CONFIDENCE: u32 = 200;

/// Components extracted from one address; `None` means unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressComponents {
    pub region: Option<String>,
    pub municipal_district: Option<String>,
    pub settlement: Option<String>,
    pub street: Option<String>,
    pub house: Option<String>,
    pub apartment: Option<String>,
}

/// Which record components were filled from defaults rather than parsed.
///
/// The defaults policy never leaves a cell empty, at the cost of implying
/// false precision; these flags let a stricter consumer tell inferred
/// values from placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultedComponents {
    pub region: bool,
    pub municipal_district: bool,
    pub settlement: bool,
    pub street: bool,
    pub house: bool,
    pub apartment: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Error,
    Warning,
}

/// One processed address row. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRecord {
    /// 1-based source row index
    pub id: usize,
    /// Concatenated raw address text
    pub original: String,
    /// Cleaned string
    pub normalized: String,
    pub region: String,
    pub municipal_district: String,
    pub settlement: String,
    pub street: String,
    pub house: String,
    pub apartment: String,
    /// Display-only identifier in registry-key shape; carries no meaning
    pub pseudo_guid: String,
    pub accuracy_level: AccuracyLevel,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// [`FULL_CONFIDENCE`] when validated, 0 when rejected
    pub confidence: u32,
    pub defaulted: DefaultedComponents,
}

/// Outcome of processing a whole table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub success: Vec<AddressRecord>,
    pub errors: Vec<AddressRecord>,
    /// Source row count, including skipped blank rows
    pub total: usize,
    /// True when processing was aborted by a cancellation signal;
    /// the collections then hold the partial result built so far
    pub cancelled: bool,
}

impl ProcessingResult {
    /// Rows that produced a record (blank rows are skipped and excluded).
    pub fn processed(&self) -> usize {
        self.success.len() + self.errors.len()
    }
}

/// Fold components into a record, substituting dictionary defaults for
/// anything unresolved and flagging what was defaulted.
#[allow(clippy::too_many_arguments)]
pub fn assemble_record(
    id: usize,
    original: String,
    normalized: String,
    components: AddressComponents,
    accuracy_level: AccuracyLevel,
    validation: Result<(), String>,
    dictionary: &ReferenceDictionary,
) -> AddressRecord {
    let defaults = dictionary.defaults();
    let defaulted = DefaultedComponents {
        region: components.region.is_none(),
        municipal_district: components.municipal_district.is_none(),
        settlement: components.settlement.is_none(),
        street: components.street.is_none(),
        house: components.house.is_none(),
        apartment: components.apartment.is_none(),
    };
    let (status, error_message, confidence) = match validation {
        Ok(()) => (RecordStatus::Success, None, FULL_CONFIDENCE),
        Err(reason) => (RecordStatus::Error, Some(reason), 0),
    };

    AddressRecord {
        id,
        original,
        normalized,
        region: components.region.unwrap_or_else(|| defaults.region.to_string()),
        municipal_district: components
            .municipal_district
            .unwrap_or_else(|| defaults.municipal_district.to_string()),
        settlement: components
            .settlement
            .unwrap_or_else(|| defaults.settlement.to_string()),
        street: components.street.unwrap_or_else(|| defaults.street.to_string()),
        house: components.house.unwrap_or_else(|| defaults.house.to_string()),
        apartment: components
            .apartment
            .unwrap_or_else(|| defaults.apartment.to_string()),
        pseudo_guid: pseudo_guid(),
        accuracy_level,
        status,
        error_message,
        confidence,
        defaulted,
    }
}

/// Generate a display-only identifier in the canonical 8-4-4-4-12 hex
/// grouping shape from a non-cryptographic random source.
pub fn pseudo_guid() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    let h = hex::encode(bytes);
    format!(
        "{}-{}-{}-{}-{}",
        &h[0..8],
        &h[8..12],
        &h[12..16],
        &h[16..20],
        &h[20..32]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components() -> AddressComponents {
        AddressComponents {
            settlement: Some("Казань".to_string()),
            street: Some("ул. Баумана".to_string()),
            house: Some("3".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_pseudo_guid_shape() {
        let guid = pseudo_guid();
        let groups: Vec<&str> = guid.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(guid
            .chars()
            .all(|c| c == '-' || c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_assemble_fills_defaults_and_flags() {
        let dict = ReferenceDictionary::builtin();
        let record = assemble_record(
            1,
            "казань баумана 3".to_string(),
            "Казань, ул. Баумана, д. 3".to_string(),
            components(),
            AccuracyLevel::House,
            Ok(()),
            &dict,
        );
        assert_eq!(record.settlement, "Казань");
        assert_eq!(record.region, "Москва");
        assert_eq!(record.apartment, "-");
        assert!(record.defaulted.region);
        assert!(!record.defaulted.settlement);
        assert!(record.defaulted.apartment);
        assert_eq!(record.status, RecordStatus::Success);
        assert_eq!(record.confidence, FULL_CONFIDENCE);
        assert!(record.error_message.is_none());
    }

    #[test]
    fn test_assemble_rejected_record() {
        let dict = ReferenceDictionary::builtin();
        let record = assemble_record(
            4,
            "x".to_string(),
            "X".to_string(),
            AddressComponents::default(),
            AccuracyLevel::Street,
            Err("address too short".to_string()),
            &dict,
        );
        assert_eq!(record.status, RecordStatus::Error);
        assert_eq!(record.confidence, 0);
        assert_eq!(record.error_message.as_deref(), Some("address too short"));
    }

    #[test]
    fn test_result_processed_count() {
        let mut result = ProcessingResult {
            total: 5,
            ..Default::default()
        };
        let dict = ReferenceDictionary::builtin();
        result.success.push(assemble_record(
            1,
            "a".into(),
            "a".into(),
            components(),
            AccuracyLevel::Street,
            Ok(()),
            &dict,
        ));
        assert_eq!(result.processed(), 1);
        assert!(!result.cancelled);
    }
}
