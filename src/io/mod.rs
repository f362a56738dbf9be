//! Row reader and result writer collaborators.
//!
//! The core pipeline never touches file bytes; these adapters turn a CSV
//! file into a `RawTable` and a `ProcessingResult` back into a CSV.

pub mod export;
pub mod reader;
