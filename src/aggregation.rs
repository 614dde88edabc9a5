//! Aggregation of campaign statistics into report rows
//!
//! All category records of one campaign are folded into a single
//! [`CampaignReportRow`]: summed cost and clicks, the reporting currency,
//! and the share of the campaign's monthly budget consumed.
//!
//! # Examples
//!
//! ```
//! use adstat::aggregation::summarize;
//! use adstat::types::{CampaignName, RunId, StatisticRecord};
//! use adstat::BudgetTable;
//!
//! let records: Vec<StatisticRecord> = serde_json::from_str(
//!     r#"[{"cost": 250, "clicks": 10, "currency": "EUR"}]"#,
//! )
//! .unwrap();
//! let budgets = BudgetTable::from_iter([("A", 1000.0)]);
//!
//! let row = summarize(&CampaignName::new("A"), &records, &budgets, &RunId::new("RUN_1"));
//! assert_eq!(row.total_cost, 250.0);
//! assert_eq!(row.budget_used_pct, 25.0);
//! ```

use adstat_core::BudgetTable;
use adstat_core::types::{CampaignName, CampaignReportRow, Currency, RunId, StatisticRecord};
use serde::{Deserialize, Serialize};

/// Running cost and click totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub cost: f64,
    pub clicks: u64,
}

impl Totals {
    /// Sum the cost and clicks of a record sequence; absent values count as 0
    pub fn from_records(records: &[StatisticRecord]) -> Self {
        records.iter().fold(Self::default(), |mut totals, record| {
            totals.cost += record.cost_or_zero();
            totals.clicks = totals.clicks.saturating_add(record.clicks_or_zero());
            totals
        })
    }

    /// Sum the totals of already aggregated rows
    pub fn from_rows(rows: &[CampaignReportRow]) -> Self {
        let mut totals = Self::default();
        for row in rows {
            totals.cost += row.total_cost;
            totals.clicks = totals.clicks.saturating_add(row.total_clicks);
        }
        totals
    }
}

/// Reporting currency: the first record's, or the unknown sentinel
pub fn reporting_currency(records: &[StatisticRecord]) -> Currency {
    records
        .first()
        .and_then(|r| r.currency.as_deref())
        .map(Currency::new)
        .unwrap_or_else(Currency::unknown)
}

/// Aggregate one campaign's records into a report row
pub fn summarize(
    campaign: &CampaignName,
    records: &[StatisticRecord],
    budgets: &BudgetTable,
    run_id: &RunId,
) -> CampaignReportRow {
    let totals = Totals::from_records(records);

    CampaignReportRow {
        campaign: campaign.clone(),
        total_cost: totals.cost,
        total_clicks: totals.clicks,
        currency: reporting_currency(records),
        budget_used_pct: budgets.utilization_pct(campaign, totals.cost),
        run_id: run_id.clone(),
    }
}
