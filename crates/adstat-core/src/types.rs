//! Core domain types for adstat
//!
//! This module contains the fundamental types used throughout adstat.
//! These types provide strong typing for campaign names and identifiers,
//! currencies, run identifiers, upstream statistic records and the report
//! rows written to the spreadsheet.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Strongly-typed campaign display name
///
/// The display name is the key used for budget lookups and the first
/// column of every report row.
///
/// # Examples
/// ```
/// use adstat_core::types::CampaignName;
///
/// let name = CampaignName::new("Shop FR");
/// assert_eq!(name.as_str(), "Shop FR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignName(String);

impl CampaignName {
    /// Create a new CampaignName from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampaignName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CampaignName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Upstream campaign identifier
///
/// The statistics API uses numeric ids but they are only ever placed in a
/// URL path, so they are carried as strings. Numbers in configuration or
/// API payloads are accepted and stringified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CampaignId(String);

impl CampaignId {
    /// Create a new CampaignId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CampaignId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => CampaignId(s),
            StringOrNumber::Unsigned(n) => CampaignId(n.to_string()),
            StringOrNumber::Signed(n) => CampaignId(n.to_string()),
        })
    }
}

/// Reporting currency code (e.g. "EUR")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Sentinel written when a campaign returned no records, or the first
    /// record carried no currency.
    pub const UNKNOWN: &'static str = "NAN";

    /// Create a new Currency
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The "unknown currency" sentinel
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Whether this is the sentinel value
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one report run
///
/// Embeds the generation instant and the queried date range, e.g.
/// `RUN_20240108093000_From_2024-01-01_To_2024-01-07`. Every row of a run
/// carries it and the run's worksheet is titled with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Create a new RunId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One per-category statistics record returned by the statistics API
///
/// Only `cost`, `clicks` and `currency` are read. Missing or malformed
/// values (strings, nulls, negative click counts) deserialize to `None`
/// and count as zero when summed; they never fail the whole payload.
///
/// # Examples
/// ```
/// use adstat_core::types::StatisticRecord;
///
/// let record: StatisticRecord =
///     serde_json::from_str(r#"{"clicks": 3, "cost": "n/a", "category": "Shoes"}"#).unwrap();
/// assert_eq!(record.cost_or_zero(), 0.0);
/// assert_eq!(record.clicks_or_zero(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticRecord {
    /// Spend for this category
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: Option<f64>,
    /// Clicks for this category
    #[serde(default, deserialize_with = "lenient_u64")]
    pub clicks: Option<u64>,
    /// Currency code of `cost`
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
}

impl StatisticRecord {
    /// Cost, with absent values counted as zero
    pub fn cost_or_zero(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }

    /// Clicks, with absent values counted as zero
    pub fn clicks_or_zero(&self) -> u64 {
        self.clicks.unwrap_or(0)
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite()))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| {
        v.as_u64().or_else(|| {
            // Some payloads encode counts as 12.0
            v.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
    }))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Aggregated result for one campaign over one reporting window
///
/// Written exactly once to the run's worksheet, in the column order
/// `Account Name, Total Cost, Total Clicks, Currency, % of Budget Used, Timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReportRow {
    /// Campaign display name
    pub campaign: CampaignName,
    /// Summed cost over all records
    pub total_cost: f64,
    /// Summed clicks over all records
    pub total_clicks: u64,
    /// Currency of the first record, or the unknown sentinel
    pub currency: Currency,
    /// Share of the monthly budget consumed, in percent
    pub budget_used_pct: f64,
    /// Run this row belongs to
    pub run_id: RunId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_id_from_number_or_string() {
        let from_number: CampaignId = serde_json::from_str("12345").unwrap();
        let from_string: CampaignId = serde_json::from_str("\"12345\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "12345");
    }

    #[test]
    fn test_record_with_all_fields() {
        let record: StatisticRecord =
            serde_json::from_str(r#"{"cost": 12.5, "clicks": 7, "currency": "EUR"}"#).unwrap();
        assert_eq!(record.cost, Some(12.5));
        assert_eq!(record.clicks, Some(7));
        assert_eq!(record.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_record_missing_fields_default_to_none() {
        let record: StatisticRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, StatisticRecord::default());
        assert_eq!(record.cost_or_zero(), 0.0);
        assert_eq!(record.clicks_or_zero(), 0);
    }

    #[test]
    fn test_record_malformed_fields_are_absent() {
        let record: StatisticRecord = serde_json::from_str(
            r#"{"cost": "12.5", "clicks": -3, "currency": 978}"#,
        )
        .unwrap();
        assert_eq!(record.cost, None);
        assert_eq!(record.clicks, None);
        assert_eq!(record.currency, None);
    }

    #[test]
    fn test_record_null_fields_are_absent() {
        let record: StatisticRecord =
            serde_json::from_str(r#"{"cost": null, "clicks": null, "currency": null}"#).unwrap();
        assert_eq!(record, StatisticRecord::default());
    }

    #[test]
    fn test_record_integral_float_clicks() {
        let record: StatisticRecord = serde_json::from_str(r#"{"clicks": 12.0}"#).unwrap();
        assert_eq!(record.clicks, Some(12));

        let record: StatisticRecord = serde_json::from_str(r#"{"clicks": 1.5}"#).unwrap();
        assert_eq!(record.clicks, None);
    }

    #[test]
    fn test_currency_sentinel() {
        let currency = Currency::unknown();
        assert!(currency.is_unknown());
        assert_eq!(currency.as_str(), "NAN");
        assert!(!Currency::new("EUR").is_unknown());
    }
}
