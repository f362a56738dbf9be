//! Address normalization core.
//!
//! Data flows strictly downward per input row:
//! dictionary → fuzzy index → normalizer → corrector → classifier →
//! validator → record assembler, driven by the pipeline orchestrator.

pub mod classify;
pub mod corrector;
pub mod dictionary;
pub mod error;
pub mod fuzzy;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod validate;
