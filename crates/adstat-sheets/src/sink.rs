//! Per-run report sink
//!
//! Every run writes to one worksheet titled with its run id. The worksheet
//! is looked up by title (an explicit query, not a not-found error) and
//! created with the header row when absent. Rows are appended as they are
//! produced; nothing is deduplicated or rolled back.

use crate::backend::{CellValue, SpreadsheetBackend};
use adstat_core::error::Result;
use adstat_core::types::{CampaignReportRow, RunId};
use tracing::{debug, info};

/// Header row of every run worksheet
pub const HEADER: [&str; 6] = [
    "Account Name",
    "Total Cost",
    "Total Clicks",
    "Currency",
    "% of Budget Used",
    "Timestamp",
];

/// Rows allocated when creating a run worksheet
pub const WORKSHEET_ROWS: u32 = 1000;

/// Columns allocated when creating a run worksheet
pub const WORKSHEET_COLUMNS: u32 = HEADER.len() as u32;

/// Handle to an ensured run worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worksheet {
    pub title: String,
}

/// Writes campaign report rows into run worksheets
pub struct ReportSink<B> {
    backend: B,
    ensured: Option<Worksheet>,
}

impl<B: SpreadsheetBackend> ReportSink<B> {
    /// Create a sink over a spreadsheet backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ensured: None,
        }
    }

    /// Access the backend, e.g. to inspect an in-memory spreadsheet
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the sink and return its backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Look up or create the worksheet for a run
    ///
    /// A new worksheet gets the header row before anything else. Calling
    /// this again for the same run returns the cached handle without
    /// querying the backend or writing another header.
    pub async fn ensure_worksheet(&mut self, run_id: &RunId) -> Result<Worksheet> {
        let title = run_id.as_str();
        if let Some(worksheet) = &self.ensured
            && worksheet.title == title
        {
            return Ok(worksheet.clone());
        }

        let titles = self.backend.list_worksheets().await?;
        if titles.iter().any(|t| t == title) {
            debug!("Reusing existing worksheet {}", title);
        } else {
            info!("Creating worksheet {}", title);
            self.backend
                .add_worksheet(title, WORKSHEET_ROWS, WORKSHEET_COLUMNS)
                .await?;
            self.backend.append_row(title, header_cells()).await?;
        }

        let worksheet = Worksheet {
            title: title.to_string(),
        };
        self.ensured = Some(worksheet.clone());
        Ok(worksheet)
    }

    /// Append one report row to a worksheet
    pub async fn append_row(
        &mut self,
        worksheet: &Worksheet,
        row: &CampaignReportRow,
    ) -> Result<()> {
        self.backend
            .append_row(&worksheet.title, row_cells(row))
            .await
    }
}

/// Header row as cells
pub fn header_cells() -> Vec<CellValue> {
    HEADER.iter().map(|h| CellValue::from(*h)).collect()
}

/// A report row as cells, in [`HEADER`] order
pub fn row_cells(row: &CampaignReportRow) -> Vec<CellValue> {
    vec![
        CellValue::from(row.campaign.as_str()),
        CellValue::from(row.total_cost),
        CellValue::from(row.total_clicks),
        CellValue::from(row.currency.as_str()),
        CellValue::from(row.budget_used_pct),
        CellValue::from(row.run_id.as_str()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySpreadsheet;
    use adstat_core::types::{CampaignName, Currency};

    fn sample_row(name: &str, run_id: &RunId) -> CampaignReportRow {
        CampaignReportRow {
            campaign: CampaignName::new(name),
            total_cost: 250.0,
            total_clicks: 10,
            currency: Currency::new("EUR"),
            budget_used_pct: 25.0,
            run_id: run_id.clone(),
        }
    }

    #[tokio::test]
    async fn test_ensure_creates_worksheet_with_header() {
        let run_id = RunId::new("RUN_20240108060000_From_2024-01-01_To_2024-01-07");
        let mut sink = ReportSink::new(MemorySpreadsheet::new());

        let worksheet = sink.ensure_worksheet(&run_id).await.unwrap();
        assert_eq!(worksheet.title, run_id.as_str());

        let stored = sink.backend().worksheet(run_id.as_str()).unwrap();
        assert_eq!(stored.rows, vec![header_cells()]);
        assert_eq!(stored.row_count, 1000);
        assert_eq!(stored.column_count, 6);
    }

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let run_id = RunId::new("RUN_1");
        let mut sink = ReportSink::new(MemorySpreadsheet::new());

        let first = sink.ensure_worksheet(&run_id).await.unwrap();
        let second = sink.ensure_worksheet(&run_id).await.unwrap();

        assert_eq!(first, second);
        let backend = sink.backend();
        assert_eq!(backend.worksheets().len(), 1);
        assert_eq!(backend.worksheet("RUN_1").unwrap().rows.len(), 1);
        assert_eq!(backend.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_existing_worksheet_gets_no_second_header() {
        let run_id = RunId::new("RUN_1");
        let backend = MemorySpreadsheet::new().with_worksheet("RUN_1", vec![header_cells()]);
        let mut sink = ReportSink::new(backend);

        let worksheet = sink.ensure_worksheet(&run_id).await.unwrap();
        sink.append_row(&worksheet, &sample_row("A", &run_id))
            .await
            .unwrap();

        let rows = &sink.backend().worksheet("RUN_1").unwrap().rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], header_cells());
    }

    #[tokio::test]
    async fn test_new_run_id_gets_new_worksheet() {
        let mut sink = ReportSink::new(MemorySpreadsheet::new());
        sink.ensure_worksheet(&RunId::new("RUN_1")).await.unwrap();
        sink.ensure_worksheet(&RunId::new("RUN_2")).await.unwrap();

        assert_eq!(sink.backend().worksheets().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_rows_are_appended() {
        let run_id = RunId::new("RUN_1");
        let mut sink = ReportSink::new(MemorySpreadsheet::new());
        let worksheet = sink.ensure_worksheet(&run_id).await.unwrap();

        let row = sample_row("A", &run_id);
        sink.append_row(&worksheet, &row).await.unwrap();
        sink.append_row(&worksheet, &row).await.unwrap();

        let backend = sink.into_backend();
        let rows = &backend.worksheet("RUN_1").unwrap().rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], rows[2]);
    }

    #[test]
    fn test_row_cells_order() {
        let run_id = RunId::new("RUN_1");
        let cells = row_cells(&sample_row("A", &run_id));
        assert_eq!(
            cells,
            vec![
                CellValue::from("A"),
                CellValue::from(250.0),
                CellValue::from(10u64),
                CellValue::from("EUR"),
                CellValue::from(25.0),
                CellValue::from("RUN_1"),
            ]
        );
    }
}
