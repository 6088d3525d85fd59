//! CSV export of entity records
//!
//! The export is append-only and flushed after every row, so the file stays
//! valid if the process is interrupted mid-run. The header row is written
//! exactly once per process invocation, before the first record.

use crate::scrape::EntityRecord;
use crate::Result;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Incremental CSV writer for entity records
pub struct CsvExport {
    writer: csv::Writer<File>,
}

impl CsvExport {
    /// Opens the export file for appending, creating it if absent
    ///
    /// The header (`name,address,website,email,phone,url`) is emitted ahead
    /// of the first record serialized through this writer.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);
        Ok(Self { writer })
    }

    /// Appends one record and flushes it to disk
    pub fn append(&mut self, record: &EntityRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str, url: &str) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            address: "Via Roma 1".to_string(),
            website: "https://example.org".to_string(),
            email: "info@example.org".to_string(),
            phone: "555-0100".to_string(),
            source_url: url.to_string(),
        }
    }

    #[test]
    fn test_header_written_once_per_invocation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let mut export = CsvExport::open(&path).unwrap();
        export.append(&record("One", "https://example.com/r/1")).unwrap();
        export.append(&record("Two", "https://example.com/r/2")).unwrap();
        drop(export);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,address,website,email,phone,url");
        assert!(lines[1].starts_with("One,"));
        assert!(lines[2].starts_with("Two,"));
    }

    #[test]
    fn test_embedded_delimiters_are_quoted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let mut export = CsvExport::open(&path).unwrap();
        let mut rec = record("Comma, Place", "https://example.com/r/1");
        rec.address = "Line one\nLine two".to_string();
        export.append(&rec).unwrap();
        drop(export);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Comma, Place\""));
        assert!(contents.contains("\"Line one\nLine two\""));
    }

    #[test]
    fn test_rows_survive_without_explicit_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let mut export = CsvExport::open(&path).unwrap();
        export.append(&record("One", "https://example.com/r/1")).unwrap();

        // Flushed per row: the file is already complete while the writer
        // is still open.
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_url_column_carries_source_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let mut export = CsvExport::open(&path).unwrap();
        export.append(&record("One", "https://example.com/r/42")).unwrap();
        drop(export);

        let contents = std::fs::read_to_string(&path).unwrap();
        let last = contents.lines().last().unwrap();
        assert!(last.ends_with("https://example.com/r/42"));
    }
}
