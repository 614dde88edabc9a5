//! Output formatting module for adstat
//!
//! After a run the rows written to the spreadsheet are summarized on stdout,
//! either as a table for humans or as JSON for scripts. The campaign listing
//! uses the same two formats.
//!
//! # Examples
//!
//! ```no_run
//! use adstat::output::get_formatter;
//! use adstat::runner::RunSummary;
//! use adstat::ReportingWindow;
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 8, 6, 0, 0).unwrap();
//! let summary = RunSummary {
//!     window: ReportingWindow::compute(&now),
//!     worksheet: None,
//!     rows: Vec::new(),
//!     skipped: Vec::new(),
//! };
//!
//! println!("{}", get_formatter(false).format_run(&summary));
//! println!("{}", get_formatter(true).format_run(&summary));
//! ```

use crate::aggregation::Totals;
use crate::runner::{AccountCampaigns, RunSummary};
use colored::Colorize;
use prettytable::{Row, Table, format, row};
use serde_json::json;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the rows written by a run, with totals and skipped campaigns
    fn format_run(&self, summary: &RunSummary) -> String;

    /// Format the campaigns visible to each account
    fn format_campaigns(&self, listings: &[AccountCampaigns]) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter;

impl TableFormatter {
    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Budget percentage, red once the budget is exceeded
    fn format_pct(pct: f64) -> String {
        let text = format!("{pct:.1}%");
        if pct > 100.0 {
            text.red().to_string()
        } else {
            text
        }
    }

    fn format_totals_row(totals: &Totals) -> Row {
        row![
            b -> "TOTAL",
            br -> format!("{:.2}", totals.cost),
            br -> Self::format_number(totals.clicks),
            "",
            ""
        ]
    }
}

impl OutputFormatter for TableFormatter {
    fn format_run(&self, summary: &RunSummary) -> String {
        let window = &summary.window;
        let mut output = format!(
            "Report {} to {} (week of {})\n",
            window.start_date_str(),
            window.end_date_str(),
            window.last_monday
        );

        if summary.rows.is_empty() {
            output.push_str("No rows written.\n");
        } else {
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
            table.set_titles(row![
                b -> "Campaign",
                b -> "Total Cost",
                b -> "Total Clicks",
                b -> "Currency",
                b -> "% of Budget"
            ]);

            for row in &summary.rows {
                table.add_row(row![
                    row.campaign.as_str(),
                    r -> format!("{:.2}", row.total_cost),
                    r -> Self::format_number(row.total_clicks),
                    row.currency.as_str(),
                    r -> Self::format_pct(row.budget_used_pct)
                ]);
            }

            table.add_row(Self::format_totals_row(&Totals::from_rows(&summary.rows)));
            output.push_str(&table.to_string());

            if let Some(worksheet) = &summary.worksheet {
                output.push_str(&format!("Worksheet: {worksheet}\n"));
            }
        }

        if !summary.skipped.is_empty() {
            output.push_str(&format!("Skipped {} campaign(s):\n", summary.skipped.len()));
            for skipped in &summary.skipped {
                output.push_str(&format!(
                    "  {} ({}): {}\n",
                    skipped.campaign, skipped.account, skipped.error
                ));
            }
        }

        output
    }

    fn format_campaigns(&self, listings: &[AccountCampaigns]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Account", b -> "Campaign ID", b -> "Name"]);

        for listing in listings {
            for campaign in &listing.campaigns {
                table.add_row(row![
                    listing.account,
                    campaign.id.as_str(),
                    campaign.name.as_deref().unwrap_or("-")
                ]);
            }
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_run(&self, summary: &RunSummary) -> String {
        let totals = Totals::from_rows(&summary.rows);
        let output = json!({
            "run_id": summary.window.run_id,
            "window": summary.window,
            "worksheet": summary.worksheet,
            "rows": summary.rows,
            "skipped": summary.skipped,
            "totals": totals,
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    fn format_campaigns(&self, listings: &[AccountCampaigns]) -> String {
        let output = json!({ "accounts": listings });
        serde_json::to_string_pretty(&output).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

/// Get the formatter for the requested output mode
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}
