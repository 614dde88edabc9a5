//! In-memory spreadsheet backend
//!
//! Used by `adstat run --dry-run` to collect what would be written, and by
//! tests to inspect worksheets and rows without a spreadsheet service.

use crate::backend::{CellValue, SpreadsheetBackend};
use adstat_core::error::{AdstatError, Result};
use async_trait::async_trait;
use tracing::debug;

/// One worksheet held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryWorksheet {
    pub title: String,
    pub row_count: u32,
    pub column_count: u32,
    pub rows: Vec<Vec<CellValue>>,
}

/// Spreadsheet kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySpreadsheet {
    worksheets: Vec<MemoryWorksheet>,
    list_calls: usize,
    appends: usize,
    append_limit: Option<usize>,
}

impl MemorySpreadsheet {
    /// Create an empty spreadsheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every append after the first `limit` ones, like a quota error
    pub fn with_append_limit(mut self, limit: usize) -> Self {
        self.append_limit = Some(limit);
        self
    }

    /// Add a pre-existing worksheet
    pub fn with_worksheet(mut self, title: &str, rows: Vec<Vec<CellValue>>) -> Self {
        self.worksheets.push(MemoryWorksheet {
            title: title.to_string(),
            row_count: 1000,
            column_count: 6,
            rows,
        });
        self
    }

    /// All worksheets, in creation order
    pub fn worksheets(&self) -> &[MemoryWorksheet] {
        &self.worksheets
    }

    /// Look up a worksheet by title
    pub fn worksheet(&self, title: &str) -> Option<&MemoryWorksheet> {
        self.worksheets.iter().find(|w| w.title == title)
    }

    /// How many times the worksheet titles were queried
    pub fn list_calls(&self) -> usize {
        self.list_calls
    }
}

#[async_trait]
impl SpreadsheetBackend for MemorySpreadsheet {
    async fn list_worksheets(&mut self) -> Result<Vec<String>> {
        self.list_calls += 1;
        Ok(self.worksheets.iter().map(|w| w.title.clone()).collect())
    }

    async fn add_worksheet(&mut self, title: &str, rows: u32, columns: u32) -> Result<()> {
        if self.worksheet(title).is_some() {
            return Err(AdstatError::Sink(format!(
                "A sheet with the name \"{title}\" already exists"
            )));
        }
        debug!("Adding in-memory worksheet {}", title);
        self.worksheets.push(MemoryWorksheet {
            title: title.to_string(),
            row_count: rows,
            column_count: columns,
            rows: Vec::new(),
        });
        Ok(())
    }

    async fn append_row(&mut self, title: &str, cells: Vec<CellValue>) -> Result<()> {
        if let Some(limit) = self.append_limit
            && self.appends >= limit
        {
            return Err(AdstatError::Sink("Quota exceeded for append requests".into()));
        }

        let worksheet = self
            .worksheets
            .iter_mut()
            .find(|w| w.title == title)
            .ok_or_else(|| AdstatError::Sink(format!("Unable to parse range: '{title}'!A1")))?;
        worksheet.rows.push(cells);
        self.appends += 1;
        Ok(())
    }
}
