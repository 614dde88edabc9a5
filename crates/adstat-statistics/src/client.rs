//! HTTP client for the merchant statistics API
//!
//! Both endpoints are authenticated with the merchant account's bearer
//! token. Any non-success status becomes [`AdstatError::Upstream`] carrying
//! the status code and response body. There is no retry and no timeout
//! beyond the transport default.

use crate::campaign::Campaign;
use adstat_core::error::{AdstatError, Result};
use adstat_core::types::{CampaignId, StatisticRecord};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Production base URL of the merchant statistics API
pub const DEFAULT_BASE_URL: &str = "https://api.kelkoogroup.net/merchant/statistics/v1";

/// Client for the merchant statistics API
#[derive(Debug, Clone)]
pub struct StatisticsClient {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl Default for StatisticsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl StatisticsClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client sharing an existing HTTP client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the campaigns visible to a merchant account token
    pub async fn list_campaigns(&self, token: &str) -> Result<Vec<Campaign>> {
        let url = format!("{}/my-campaigns", self.base_url);
        debug!("Listing campaigns from {}", url);

        self.get_json(self.client.get(url.as_str()), token).await
    }

    /// Fetch the per-category statistics of one campaign
    ///
    /// `start_date` and `end_date` are inclusive `YYYY-MM-DD` dates.
    pub async fn get_category_data(
        &self,
        token: &str,
        campaign_id: &CampaignId,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<StatisticRecord>> {
        let url = format!("{}/category/{}", self.base_url, campaign_id);
        debug!(
            "Fetching category data for campaign {} from {} to {}",
            campaign_id, start_date, end_date
        );

        let request = self
            .client
            .get(url.as_str())
            .query(&[("startDate", start_date), ("endDate", end_date)]);
        let records: Vec<StatisticRecord> = self.get_json(request, token).await?;

        debug!(
            "Campaign {} returned {} category records",
            campaign_id,
            records.len()
        );
        Ok(records)
    }

    /// Send an authenticated request and decode a JSON success body
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        token: &str,
    ) -> Result<T> {
        let response = request
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdstatError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
