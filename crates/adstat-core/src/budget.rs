//! Monthly budget table
//!
//! Static mapping from campaign display name to a fixed monthly budget.
//! Budgets are configuration, not derived data. A campaign without an entry
//! has a zero budget, which reports 0% utilization rather than failing.

use crate::types::CampaignName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Campaign name to monthly budget lookup
///
/// # Examples
/// ```
/// use adstat_core::BudgetTable;
/// use adstat_core::types::CampaignName;
///
/// let budgets = BudgetTable::from_iter([("Shop FR", 1000.0)]);
/// assert_eq!(budgets.monthly_budget(&CampaignName::new("Shop FR")), 1000.0);
/// assert_eq!(budgets.monthly_budget(&CampaignName::new("Shop DE")), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable(HashMap<String, f64>);

impl BudgetTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the monthly budget for a campaign
    pub fn insert(&mut self, campaign: impl Into<String>, budget: f64) {
        self.0.insert(campaign.into(), budget);
    }

    /// Monthly budget for a campaign, 0 when none is configured
    pub fn monthly_budget(&self, campaign: &CampaignName) -> f64 {
        self.0.get(campaign.as_str()).copied().unwrap_or(0.0)
    }

    /// Percentage of the monthly budget consumed by `cost`
    ///
    /// Returns 0 when the campaign has no (or a zero) budget.
    pub fn utilization_pct(&self, campaign: &CampaignName, cost: f64) -> f64 {
        let budget = self.monthly_budget(campaign);
        if budget != 0.0 {
            cost / budget * 100.0
        } else {
            0.0
        }
    }

    /// Number of configured budgets
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no budgets are configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for BudgetTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_budget_is_zero() {
        let budgets = BudgetTable::new();
        assert_eq!(budgets.monthly_budget(&CampaignName::new("anything")), 0.0);
        assert!(budgets.is_empty());
    }

    #[test]
    fn test_utilization() {
        let budgets = BudgetTable::from_iter([("A", 1000.0)]);
        let a = CampaignName::new("A");
        assert_eq!(budgets.utilization_pct(&a, 250.0), 25.0);
        assert_eq!(budgets.utilization_pct(&a, 0.0), 0.0);
        assert_eq!(budgets.utilization_pct(&a, 1500.0), 150.0);
    }

    #[test]
    fn test_zero_budget_never_divides() {
        let mut budgets = BudgetTable::new();
        budgets.insert("Z", 0.0);
        let z = CampaignName::new("Z");
        assert_eq!(budgets.utilization_pct(&z, 999.0), 0.0);
        assert_eq!(
            budgets.utilization_pct(&CampaignName::new("missing"), 10.0),
            0.0
        );
    }

    #[test]
    fn test_deserialize_from_map() {
        let budgets: BudgetTable = serde_json::from_str(r#"{"A": 1000, "B": 250.5}"#).unwrap();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets.monthly_budget(&CampaignName::new("B")), 250.5);
    }
}
