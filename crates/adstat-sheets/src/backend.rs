//! Spreadsheet backend trait
//!
//! The three operations adstat needs from a spreadsheet service: list the
//! worksheet titles, add a worksheet, and append one row to a worksheet.

use adstat_core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(u64),
    Number(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(n) => write!(f, "{n}"),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Storage operations behind a [`crate::ReportSink`]
///
/// All failures are reported as [`adstat_core::AdstatError::Sink`].
#[async_trait]
pub trait SpreadsheetBackend: Send {
    /// Titles of all worksheets in the spreadsheet
    async fn list_worksheets(&mut self) -> Result<Vec<String>>;

    /// Add an empty worksheet sized `rows` x `columns`
    async fn add_worksheet(&mut self, title: &str, rows: u32, columns: u32) -> Result<()>;

    /// Append one row after the last non-empty row of a worksheet
    async fn append_row(&mut self, title: &str, cells: Vec<CellValue>) -> Result<()>;
}
