//! Result Writers
//!
//! Writes a `ProcessingResult` either as a flat CSV (header, then
//! normalized rows, then rejected rows) or as structured JSON with the
//! full per-record component breakdown.

use std::path::Path;

use crate::core::error::Result;
use crate::core::record::{AddressRecord, ProcessingResult};

const HEADER: &[&str] = &["id", "original", "normalized", "status", "error", "confidence"];

/// Write the whole result to `path`, success records first.
pub fn write_results_csv(result: &ProcessingResult, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for record in result.success.iter().chain(result.errors.iter()) {
        write_record(&mut writer, record)?;
    }
    writer.flush()?;
    log::info!(
        "wrote {} records to {}",
        result.processed(),
        path.display()
    );
    Ok(())
}

/// Write the whole result as pretty-printed JSON, components included.
pub fn write_results_json(result: &ProcessingResult, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), result)?;
    log::info!(
        "wrote {} records to {}",
        result.processed(),
        path.display()
    );
    Ok(())
}

fn write_record<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    record: &AddressRecord,
) -> Result<()> {
    writer.write_record([
        record.id.to_string().as_str(),
        &record.original,
        &record.normalized,
        match record.error_message {
            None => "success",
            Some(_) => "error",
        },
        record.error_message.as_deref().unwrap_or(""),
        record.confidence.to_string().as_str(),
    ])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;
    use crate::core::pipeline::AddressPipeline;
    use tempfile::TempDir;

    #[test]
    fn test_export_layout() {
        let pipeline = AddressPipeline::new(NormalizerConfig::default());
        let table = vec![
            vec!["Москва, ул. Ленина д. 10".to_string()],
            vec!["x".to_string()],
        ];
        let result = pipeline.process_table(&table);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_results_csv(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,original,normalized,status,error,confidence"
        );
        // Success rows come before error rows
        let first = lines.next().unwrap();
        assert!(first.starts_with("1,"));
        assert!(first.contains("success"));
        let second = lines.next().unwrap();
        assert!(second.starts_with("2,"));
        assert!(second.contains("error"));
        assert!(second.ends_with(",0"));
    }

    #[test]
    fn test_json_export_roundtrips() {
        let pipeline = AddressPipeline::new(NormalizerConfig::default());
        let table = vec![vec!["Москва, ул. Ленина д. 10".to_string()]];
        let result = pipeline.process_table(&table);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_results_json(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: ProcessingResult = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.success.len(), 1);
        assert_eq!(parsed.success[0].house, "10");
        assert_eq!(parsed.total, 1);
    }
}
