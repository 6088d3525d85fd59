//! Tab-indented audit trail writer
//!
//! One audit file per hierarchy level: the parent URL on its own line, each
//! discovered child URL tab-indented beneath it. Files are append-only and
//! created if absent; the format is a trail of what a run visited, not a
//! deduplicated store.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends parent/child URL blocks to an audit file
pub struct AuditWriter {
    writer: BufWriter<File>,
}

impl AuditWriter {
    /// Opens the audit file for appending, creating it if absent
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Writes one block: the parent URL, then each child tab-indented
    ///
    /// Flushes before returning so the trail survives an interrupted run.
    pub fn write_block(&mut self, parent: &str, children: &[String]) -> std::io::Result<()> {
        writeln!(self.writer, "{}", parent)?;
        for child in children {
            writeln!(self.writer, "\t{}", child)?;
        }
        self.writer.flush()
    }
}
