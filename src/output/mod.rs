//! Run outputs: audit trails and the CSV export
//!
//! All outputs are append-only files, flushed incrementally so an
//! interrupted run still leaves them valid.

mod audit;
mod export;

pub use audit::AuditWriter;
pub use export::CsvExport;
