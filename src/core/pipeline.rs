//! Pipeline Orchestrator
//!
//! Drives per-row processing over a whole input table: builds the reference
//! dictionary and fuzzy index once, runs each row through normalization,
//! correction, classification and validation, and partitions the records
//! into success/error collections.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::NormalizerConfig;

use super::classify::{parse_components, AccuracyLevel};
use super::corrector::{CorrectedAddress, Correction, SpellingCorrector};
use super::dictionary::ReferenceDictionary;
use super::fuzzy::FuzzyIndex;
use super::normalize::{normalize_caps, normalize_format, Normalizer};
use super::record::{assemble_record, AddressComponents, ProcessingResult, RawTable};
use super::validate::Validator;

/// Cooperative cancellation signal, checked between rows.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fully normalized view of a single address string.
#[derive(Debug, Clone)]
pub struct NormalizedAddress {
    /// Cleaned string after all normalization stages
    pub normalized: String,
    /// Components extracted by the rule cascade
    pub components: AddressComponents,
    pub accuracy_level: AccuracyLevel,
    /// Fuzzy corrections applied along the way
    pub corrections: Vec<Correction>,
    /// Worst-case fuzzy-correction confidence, 100 when nothing was corrected
    pub correction_confidence: u32,
}

/// Address processing pipeline. Construct once; the dictionary, fuzzy
/// index and compiled substitution rules are shared read-only across rows.
pub struct AddressPipeline {
    dictionary: ReferenceDictionary,
    index: FuzzyIndex,
    normalizer: Normalizer,
    config: NormalizerConfig,
}

impl AddressPipeline {
    pub fn new(config: NormalizerConfig) -> Self {
        let dictionary = ReferenceDictionary::builtin();
        let index = FuzzyIndex::new(&dictionary);
        let normalizer = Normalizer::new(&dictionary);
        Self {
            dictionary,
            index,
            normalizer,
            config,
        }
    }

    pub fn dictionary(&self) -> &ReferenceDictionary {
        &self.dictionary
    }

    /// Normalize one address string.
    ///
    /// Stages: abbreviation expansion → known-word corrections → fuzzy
    /// spelling correction → known-word corrections again (a fuzzy match
    /// may insert a long form the word map abbreviates) → case
    /// normalization → format rules → classification. The textual output
    /// is a fixed point: running the pipeline on its own output changes
    /// nothing.
    pub fn normalize_address(&self, raw: &str) -> NormalizedAddress {
        let expanded = self.normalizer.expand_abbreviations(raw.trim());
        let word_fixed = self.normalizer.correct_known_words(&expanded);

        let corrected = if self.config.correction.enabled {
            let corrector = SpellingCorrector::new(
                &self.index,
                &self.normalizer,
                self.config.correction.score_threshold,
                self.config.correction.confidence_floor,
            );
            let mut c = corrector.correct(&word_fixed);
            if !c.corrections.is_empty() {
                c.text = self.normalizer.correct_known_words(&c.text);
            }
            c
        } else {
            CorrectedAddress {
                text: word_fixed,
                corrections: Vec::new(),
                confidence: 100,
            }
        };

        let normalized = normalize_format(&normalize_caps(&corrected.text));
        let components = parse_components(&normalized);
        let accuracy_level = AccuracyLevel::classify(&normalized);

        NormalizedAddress {
            normalized,
            components,
            accuracy_level,
            corrections: corrected.corrections,
            correction_confidence: corrected.confidence,
        }
    }

    /// Process a whole table without progress reporting or cancellation.
    pub fn process_table(&self, table: &RawTable) -> ProcessingResult {
        self.process_table_with(table, |_| {}, None)
    }

    /// Process a whole table.
    ///
    /// Every non-blank row yields exactly one record in either `success` or
    /// `errors`, with `id` = row index + 1. Blank rows are skipped but
    /// still count toward `total` and still advance the progress callback,
    /// which fires exactly once per iterated row with a non-decreasing
    /// percentage. Cancellation is checked between rows; on cancel the
    /// partial result is returned with `cancelled` set.
    pub fn process_table_with<F>(
        &self,
        table: &RawTable,
        mut progress: F,
        cancel: Option<&CancelToken>,
    ) -> ProcessingResult
    where
        F: FnMut(u8),
    {
        let total = table.len();
        let mut result = ProcessingResult {
            total,
            ..Default::default()
        };
        let validator = Validator::new(&self.dictionary, self.config.validation);

        log::info!("processing {total} rows");

        for (i, row) in table.iter().enumerate() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                log::warn!("cancelled after {} of {total} rows", i);
                result.cancelled = true;
                return result;
            }

            let original = join_row(row);
            if original.is_empty() {
                report_progress(&mut progress, i, total);
                continue;
            }

            let normalized = self.normalize_address(&original);
            let validation = validator
                .validate(&normalized.normalized)
                .map_err(|e| e.to_string());

            let record = assemble_record(
                i + 1,
                original,
                normalized.normalized,
                normalized.components,
                normalized.accuracy_level,
                validation,
                &self.dictionary,
            );

            match record.error_message {
                None => result.success.push(record),
                Some(_) => {
                    log::debug!("row {} rejected: {:?}", record.id, record.error_message);
                    result.errors.push(record);
                }
            }

            report_progress(&mut progress, i, total);
        }

        log::info!(
            "done: {} normalized, {} rejected, {} total",
            result.success.len(),
            result.errors.len(),
            result.total
        );
        result
    }
}

impl Default for AddressPipeline {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

/// Concatenate all non-empty, trimmed cells of a row with ", ".
fn join_row(row: &[String]) -> String {
    row.iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn report_progress<F: FnMut(u8)>(progress: &mut F, index: usize, total: usize) {
    if total == 0 {
        return;
    }
    let percent = (100.0 * (index + 1) as f64 / total as f64).round() as u8;
    progress(percent);
}
