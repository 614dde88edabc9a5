//! Property-based tests for adstat using proptest

use adstat::{
    BudgetTable, ReportingWindow,
    aggregation::{Totals, summarize},
    types::{CampaignName, RunId, StatisticRecord},
};
use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use proptest::prelude::*;

// Strategies for generating test data

prop_compose! {
    fn arb_record()(
        cost in prop::option::of(0.0f64..10_000.0),
        clicks in prop::option::of(0u64..100_000),
        currency in prop::option::of(prop::sample::select(vec!["EUR", "USD", "GBP"])),
    ) -> StatisticRecord {
        StatisticRecord {
            cost,
            clicks,
            currency: currency.map(str::to_string),
        }
    }
}

prop_compose! {
    fn arb_date()(days in 0i64..3650) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(days)
    }
}

proptest! {
    #[test]
    fn test_totals_are_sums(records in prop::collection::vec(arb_record(), 0..50)) {
        let totals = Totals::from_records(&records);

        let expected_clicks: u64 = records.iter().map(|r| r.clicks.unwrap_or(0)).sum();
        let expected_cost: f64 = records.iter().map(|r| r.cost.unwrap_or(0.0)).sum();

        prop_assert_eq!(totals.clicks, expected_clicks);
        prop_assert!((totals.cost - expected_cost).abs() < 1e-6);
    }

    #[test]
    fn test_budget_percentage_law(
        records in prop::collection::vec(arb_record(), 0..20),
        budget in prop::option::of(0.0f64..50_000.0),
    ) {
        let campaign = CampaignName::new("Shop");
        let budgets = match budget {
            Some(b) => BudgetTable::from_iter([("Shop", b)]),
            None => BudgetTable::new(),
        };

        let row = summarize(&campaign, &records, &budgets, &RunId::new("RUN_X"));

        match budget {
            Some(b) if b != 0.0 => {
                let expected = row.total_cost / b * 100.0;
                prop_assert!((row.budget_used_pct - expected).abs() < 1e-9);
            }
            _ => prop_assert_eq!(row.budget_used_pct, 0.0),
        }
        prop_assert!(row.budget_used_pct >= 0.0);
    }

    #[test]
    fn test_currency_comes_from_first_record(
        records in prop::collection::vec(arb_record(), 0..10),
    ) {
        let row = summarize(
            &CampaignName::new("Shop"),
            &records,
            &BudgetTable::new(),
            &RunId::new("RUN_X"),
        );

        match records.first().and_then(|r| r.currency.as_deref()) {
            Some(code) => prop_assert_eq!(row.currency.as_str(), code),
            None => prop_assert!(row.currency.is_unknown()),
        }
    }

    #[test]
    fn test_window_shape(date in arb_date(), hour in 0u32..24) {
        let now = Utc
            .from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap());
        let window = ReportingWindow::compute(&now);

        prop_assert_eq!(window.start_date, date - Duration::days(7));
        prop_assert_eq!(window.last_monday.weekday(), Weekday::Mon);
        prop_assert_eq!(window.next_sunday.weekday(), Weekday::Sun);
        prop_assert_eq!(window.end_date, window.next_sunday);
        prop_assert!(window.start_date <= window.end_date);
        prop_assert!(window.end_date < date);
        prop_assert!((1..=7).contains(&window.queried_days()));
        prop_assert!(window.run_id.as_str().starts_with("RUN_"));
        let expected_suffix = format!(
            "_From_{}_To_{}",
            window.start_date_str(),
            window.end_date_str()
        );
        prop_assert!(window.run_id.as_str().ends_with(&expected_suffix));
    }
}
