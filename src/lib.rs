//! adstat - Weekly advertising spend report
//!
//! This library provides functionality to:
//! - Compute the weekly reporting window and its run identifier
//! - Fetch per-category campaign statistics from the merchant statistics API
//! - Aggregate cost and clicks per campaign against a monthly budget
//! - Append one row per campaign to a per-run worksheet of a Google spreadsheet
//!
//! # Examples
//!
//! ```no_run
//! use adstat::{
//!     config::Config,
//!     runner::Runner,
//!     window::ReportingWindow,
//!     adstat_sheets::{MemorySpreadsheet, ReportSink},
//! };
//!
//! #[tokio::main]
//! async fn main() -> adstat::Result<()> {
//!     let config = Config::from_file("adstat.toml")?;
//!     let window = ReportingWindow::compute(&chrono::Local::now());
//!
//!     // Collect the rows in memory instead of writing the real spreadsheet
//!     let mut sink = ReportSink::new(MemorySpreadsheet::new());
//!     let summary = Runner::new(&config).run(&window, &mut sink).await?;
//!     println!("{} rows", summary.rows.len());
//!
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod config;
pub mod output;
pub mod runner;

pub use adstat_core::{budget, error, timezone, types, window};
pub use adstat_sheets;
pub use adstat_statistics;

// Re-export commonly used types
pub use adstat_core::{AdstatError, BudgetTable, ReportingWindow, Result};
pub use types::{CampaignId, CampaignName, CampaignReportRow, Currency, RunId, StatisticRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
