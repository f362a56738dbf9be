//! CSV Row Reader
//!
//! Turns a CSV file into ordered rows of text cells. Headerless and
//! flexible-width: every cell of every row is taken as address text.
//! Decoding tries UTF-8 first and falls back to Windows-1251, which
//! Russian spreadsheet exports still commonly use.

use std::borrow::Cow;
use std::path::Path;

use crate::core::error::{AdresnikError, Result};
use crate::core::record::RawTable;

/// Read a whole CSV file into a `RawTable`.
///
/// Fails batch-level on unreadable files or malformed CSV; an empty table
/// is also a batch-level error (the pipeline would have nothing to do).
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path)?;
    let content = decode(&bytes)?;
    let table = parse_csv(&content)?;
    if table.is_empty() {
        return Err(AdresnikError::EmptyTable);
    }
    log::debug!("read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse CSV content into rows of cells.
pub fn parse_csv(content: &str) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut table = RawTable::new();
    for record in reader.records() {
        let record = record?;
        table.push(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

/// Decode bytes as UTF-8, falling back to Windows-1251.
fn decode(bytes: &[u8]) -> Result<String> {
    if let Ok(content) = std::str::from_utf8(bytes) {
        return Ok(content.to_string());
    }
    let (decoded, _, had_errors) = encoding_rs::WINDOWS_1251.decode(bytes);
    if had_errors {
        return Err(AdresnikError::Encoding(
            "input is neither valid UTF-8 nor Windows-1251".to_string(),
        ));
    }
    log::debug!("input decoded as Windows-1251");
    Ok(match decoded {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_csv_rows_and_cells() {
        let table = parse_csv("Москва,ул. Ленина\nКазань\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0], vec!["Москва", "ул. Ленина"]);
        assert_eq!(table[1], vec!["Казань"]);
    }

    #[test]
    fn test_parse_csv_keeps_blank_rows() {
        let table = parse_csv("Москва\n\"\",\"\"\nКазань\n").unwrap();
        assert_eq!(table.len(), 3);
        assert!(table[1].iter().all(|c| c.trim().is_empty()));
    }

    #[test]
    fn test_read_utf8_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "мск кв 5\n").unwrap();
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table[0][0], "мск кв 5");
    }

    #[test]
    fn test_read_cp1251_file() {
        let mut file = NamedTempFile::new().unwrap();
        let (encoded, _, _) = encoding_rs::WINDOWS_1251.encode("Москва, ул. Ленина\n");
        file.write_all(&encoded).unwrap();
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table[0][0], "Москва");
        assert_eq!(table[0][1], " ул. Ленина");
    }

    #[test]
    fn test_empty_file_is_fatal() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            read_csv_table(file.path()),
            Err(AdresnikError::EmptyTable)
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read_csv_table(Path::new("/nonexistent/addresses.csv")).unwrap_err();
        assert!(matches!(err, AdresnikError::Io(_)));
    }
}
