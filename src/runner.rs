//! Report run orchestration
//!
//! One run computes its reporting window once, then walks every configured
//! account in order and every campaign of that account in order: fetch the
//! category statistics, aggregate them, append the row to the run
//! worksheet. Everything is sequential; rows land in the spreadsheet grouped
//! by account, then in campaign order.
//!
//! By default the first failure ends the run, leaving already appended rows
//! in place. With [`FailurePolicy::SkipCampaign`] a campaign whose
//! statistics cannot be fetched is recorded as skipped and the run goes on;
//! spreadsheet failures still end the run.

use crate::aggregation::summarize;
use crate::config::{AccountConfig, CampaignConfig, Config};
use adstat_core::error::Result;
use adstat_core::types::{CampaignName, CampaignReportRow};
use adstat_core::ReportingWindow;
use adstat_sheets::{ReportSink, SpreadsheetBackend};
use adstat_statistics::{Campaign, StatisticsClient};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What to do when a campaign's statistics cannot be fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run at the first error
    #[default]
    Abort,
    /// Record the campaign as skipped and continue with the next one
    SkipCampaign,
}

/// A campaign left out of the report under [`FailurePolicy::SkipCampaign`]
#[derive(Debug, Clone, Serialize)]
pub struct SkippedCampaign {
    pub account: String,
    pub campaign: CampaignName,
    pub error: String,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub window: ReportingWindow,
    /// Worksheet the rows went to; `None` when nothing was written
    pub worksheet: Option<String>,
    /// Rows written, in write order
    pub rows: Vec<CampaignReportRow>,
    pub skipped: Vec<SkippedCampaign>,
}

/// Campaigns visible to one configured account
#[derive(Debug, Clone, Serialize)]
pub struct AccountCampaigns {
    pub account: String,
    pub campaigns: Vec<Campaign>,
}

/// Drives one report run over all configured accounts
pub struct Runner<'a> {
    config: &'a Config,
    statistics: StatisticsClient,
    policy: FailurePolicy,
    show_progress: bool,
}

impl<'a> Runner<'a> {
    /// Create a runner using the statistics API configured in `config`
    pub fn new(config: &'a Config) -> Self {
        Self::with_client(config, StatisticsClient::new(config.base_url.as_str()))
    }

    /// Create a runner with an explicit statistics client
    pub fn with_client(config: &'a Config, statistics: StatisticsClient) -> Self {
        Self {
            config,
            statistics,
            policy: FailurePolicy::default(),
            show_progress: true,
        }
    }

    /// Set the failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Print the per-campaign progress lines on stdout (on by default)
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Whether progress lines are printed
    pub fn shows_progress(&self) -> bool {
        self.show_progress
    }

    fn progress(&self, line: std::fmt::Arguments<'_>) {
        if self.show_progress {
            println!("{line}");
        }
    }

    /// Run the report for `window`, writing rows through `sink`
    pub async fn run<B: SpreadsheetBackend>(
        &self,
        window: &ReportingWindow,
        sink: &mut ReportSink<B>,
    ) -> Result<RunSummary> {
        info!(
            "Reporting {} to {} (calendar week {} to {})",
            window.start_date, window.end_date, window.last_monday, window.next_sunday
        );
        self.progress(format_args!("Start Date: {}", window.start_date_str()));
        self.progress(format_args!("End Date: {}", window.end_date_str()));
        self.progress(format_args!("Run: {}", window.run_id));

        let mut summary = RunSummary {
            window: window.clone(),
            worksheet: None,
            rows: Vec::new(),
            skipped: Vec::new(),
        };

        for (index, account) in self.config.accounts.iter().enumerate() {
            self.process_account(index, account, sink, &mut summary)
                .await?;
        }

        info!(
            "Run {} finished: {} rows written, {} campaigns skipped",
            window.run_id,
            summary.rows.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    /// List the campaigns each configured account can see, in account order
    pub async fn list_campaigns(&self) -> Result<Vec<AccountCampaigns>> {
        let mut listings = Vec::with_capacity(self.config.accounts.len());
        for (index, account) in self.config.accounts.iter().enumerate() {
            let label = account.label(index);
            let campaigns = self.statistics.list_campaigns(&account.token).await?;
            debug!("{} has {} campaigns", label, campaigns.len());
            listings.push(AccountCampaigns {
                account: label,
                campaigns,
            });
        }
        Ok(listings)
    }

    async fn process_account<B: SpreadsheetBackend>(
        &self,
        index: usize,
        account: &AccountConfig,
        sink: &mut ReportSink<B>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let label = account.label(index);
        debug!(
            "Processing {} ({} campaigns)",
            label,
            account.campaigns.len()
        );

        for campaign in &account.campaigns {
            self.progress(format_args!(
                "Processing Campaign: {}, ID: {}...",
                campaign.name, campaign.id
            ));

            let row = match self.fetch_row(account, campaign, &summary.window).await {
                Ok(row) => row,
                Err(e) if self.policy == FailurePolicy::SkipCampaign => {
                    warn!("Skipping campaign {} of {}: {}", campaign.name, label, e);
                    summary.skipped.push(SkippedCampaign {
                        account: label.clone(),
                        campaign: campaign.name.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let worksheet = sink.ensure_worksheet(&summary.window.run_id).await?;
            sink.append_row(&worksheet, &row).await?;
            self.progress(format_args!(
                "Data inserted into Google Sheet for {}",
                campaign.name
            ));

            summary.worksheet = Some(worksheet.title);
            summary.rows.push(row);
        }

        Ok(())
    }

    async fn fetch_row(
        &self,
        account: &AccountConfig,
        campaign: &CampaignConfig,
        window: &ReportingWindow,
    ) -> Result<CampaignReportRow> {
        let records = self
            .statistics
            .get_category_data(
                &account.token,
                &campaign.id,
                &window.start_date_str(),
                &window.end_date_str(),
            )
            .await?;

        Ok(summarize(
            &campaign.name,
            &records,
            &self.config.budgets,
            &window.run_id,
        ))
    }
}
