//! Common test utilities for adstat integration tests
//!
//! A wiremock server stands in for the statistics API; configurations are
//! built as TOML text so they go through the same parsing as real files.

#![allow(dead_code)]

use adstat::{config::Config, window::ReportingWindow};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run id of [`monday_window`]
pub const MONDAY_RUN_ID: &str = "RUN_20240108060000_From_2024-01-01_To_2024-01-07";

/// Window of a run started Monday 2024-01-08 at 06:00
pub fn monday_window() -> ReportingWindow {
    let now = Utc.with_ymd_and_hms(2024, 1, 8, 6, 0, 0).unwrap();
    ReportingWindow::compute(&now)
}

/// One category record as the statistics API returns it
pub fn record(cost: f64, clicks: u64, currency: &str) -> Value {
    json!({ "cost": cost, "clicks": clicks, "currency": currency })
}

/// Serve `records` for a campaign over the week of [`monday_window`]
pub async fn mount_category(server: &MockServer, token: &str, campaign_id: &str, records: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/category/{campaign_id}")))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-01-07"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}

/// Fail the statistics request of a campaign with `status`
pub async fn mount_category_error(server: &MockServer, campaign_id: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/category/{campaign_id}")))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
        .mount(server)
        .await;
}

/// Builds a TOML configuration pointing at a mock statistics API
pub struct ConfigBuilder {
    base_url: String,
    budgets: Vec<(String, f64)>,
    accounts: Vec<(String, Vec<(String, String)>)>,
}

impl ConfigBuilder {
    pub fn new(server: &MockServer) -> Self {
        Self {
            base_url: server.uri(),
            budgets: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn budget(mut self, campaign: &str, amount: f64) -> Self {
        self.budgets.push((campaign.to_string(), amount));
        self
    }

    /// Add an account with `(name, id)` campaigns
    pub fn account(mut self, token: &str, campaigns: &[(&str, &str)]) -> Self {
        self.accounts.push((
            token.to_string(),
            campaigns
                .iter()
                .map(|(name, id)| (name.to_string(), id.to_string()))
                .collect(),
        ));
        self
    }

    pub fn to_toml(&self) -> String {
        let mut toml = format!("base_url = \"{}\"\n\n[budgets]\n", self.base_url);
        for (campaign, amount) in &self.budgets {
            toml.push_str(&format!("\"{campaign}\" = {amount:?}\n"));
        }
        for (token, campaigns) in &self.accounts {
            toml.push_str(&format!("\n[[accounts]]\ntoken = \"{token}\"\ncampaigns = [\n"));
            for (name, id) in campaigns {
                toml.push_str(&format!("    {{ name = \"{name}\", id = \"{id}\" }},\n"));
            }
            toml.push_str("]\n");
        }
        toml
    }

    pub fn build(&self) -> Config {
        Config::from_toml(&self.to_toml()).unwrap()
    }
}
