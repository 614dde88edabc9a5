//! Spreadsheet report sink for adstat
//!
//! [`ReportSink`] owns the per-run worksheet logic (lookup or create, header
//! once, then one appended row per campaign). The storage itself sits
//! behind [`SpreadsheetBackend`], implemented for Google Sheets and for an
//! in-memory spreadsheet used by dry runs and tests.

pub mod auth;
pub mod backend;
pub mod google;
pub mod memory;
pub mod sink;

pub use backend::{CellValue, SpreadsheetBackend};
pub use google::GoogleSheets;
pub use memory::MemorySpreadsheet;
pub use sink::{HEADER, ReportSink, Worksheet};
