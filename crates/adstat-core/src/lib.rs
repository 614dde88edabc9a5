//! Core types, errors and utilities for adstat
//!
//! This crate provides the domain types shared by the statistics client,
//! the spreadsheet sink and the report runner: statistic records, report
//! rows, the budget table, the reporting window and timezone handling.

pub mod budget;
pub mod error;
pub mod timezone;
pub mod types;
pub mod window;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use budget::BudgetTable;
pub use error::{AdstatError, Result};
pub use types::{CampaignId, CampaignName, CampaignReportRow, Currency, RunId, StatisticRecord};
pub use window::ReportingWindow;
