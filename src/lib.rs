//! Adresnik - Russian postal address normalizer
//!
//! Core library turning free-form address spreadsheets into structured,
//! semantically classified address records: abbreviation expansion, fuzzy
//! spelling correction, rule-based component classification and validation.

pub mod config;
pub mod core;
pub mod io;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
