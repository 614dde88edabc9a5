//! Configuration for adstat
//!
//! The report is configured by a TOML file loaded once at startup and passed
//! by reference to the runner. Environment variables in the format
//! `${VAR_NAME}` are expanded before parsing, so bearer tokens can be kept
//! out of the file.
//!
//! # Example
//!
//! ```toml
//! spreadsheet_key = "1AbCdEf"
//! credentials_path = "/etc/adstat/service-account.json"
//!
//! [budgets]
//! "Shop FR" = 1500.0
//!
//! [[accounts]]
//! name = "primary"
//! token = "${ADSTAT_TOKEN_1}"
//! campaigns = [{ name = "Shop FR", id = "100001" }]
//! ```

use adstat_core::error::{AdstatError, Result};
use adstat_core::types::{CampaignId, CampaignName};
use adstat_core::BudgetTable;
use adstat_statistics::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "ADSTAT_CONFIG";

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Key of the destination spreadsheet
    #[serde(default)]
    pub spreadsheet_key: Option<String>,

    /// Path to the spreadsheet service-account key file
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    /// Base URL of the merchant statistics API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timezone "now" is evaluated in; the local timezone when omitted
    #[serde(default)]
    pub timezone: Option<String>,

    /// Monthly budget per campaign display name
    #[serde(default)]
    pub budgets: BudgetTable,

    /// Merchant accounts, processed in this order
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// One merchant account: a bearer token and its campaigns
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Label used in logs
    #[serde(default)]
    pub name: Option<String>,

    /// Bearer token for the statistics API
    pub token: String,

    /// Campaigns to report, processed in this order
    #[serde(default)]
    pub campaigns: Vec<CampaignConfig>,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("name", &self.name)
            .field("token", &"<redacted>")
            .field("campaigns", &self.campaigns)
            .finish()
    }
}

/// A campaign display name and its upstream id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignConfig {
    pub name: CampaignName,
    pub id: CampaignId,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl AccountConfig {
    /// Label for logs: the configured name or the account's position
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("account #{}", index + 1))
    }
}

impl Config {
    /// Default config location: `<config dir>/adstat/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("adstat").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AdstatError::Configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded config from {}", path.display());

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let expanded = expand_env_vars(contents)?;
        toml::from_str(&expanded)
            .map_err(|e| AdstatError::Configuration(format!("Invalid config: {e}")))
    }

    /// Spreadsheet key, required when writing to Google Sheets
    pub fn require_spreadsheet_key(&self) -> Result<&str> {
        self.spreadsheet_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AdstatError::Configuration("spreadsheet_key is not set".into()))
    }

    /// Service-account key path, required when writing to Google Sheets
    pub fn require_credentials_path(&self) -> Result<&Path> {
        self.credentials_path
            .as_deref()
            .ok_or_else(|| AdstatError::Configuration("credentials_path is not set".into()))
    }

    /// Total number of configured campaigns across all accounts
    pub fn campaign_count(&self) -> usize {
        self.accounts.iter().map(|a| a.campaigns.len()).sum()
    }
}

/// Expand environment variables in the format `${VAR_NAME}`.
/// Variables after a `#` on the same line are left alone.
fn expand_env_vars(input: &str) -> Result<String> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}")
        .map_err(|e| AdstatError::Configuration(e.to_string()))?;
    let mut result = String::with_capacity(input.len());

    for line in input.lines() {
        let comment_pos = line.find('#');
        let mut last_end = 0;

        for cap in re.captures_iter(line) {
            let Some(whole) = cap.get(0) else { continue };
            if let Some(pos) = comment_pos
                && whole.start() >= pos
            {
                continue;
            }

            result.push_str(&line[last_end..whole.start()]);
            let var_name = &cap[1];
            let value = std::env::var(var_name).map_err(|_| {
                AdstatError::Configuration(format!(
                    "Environment variable '{var_name}' referenced in config is not set"
                ))
            })?;
            result.push_str(&value);
            last_end = whole.end();
        }

        result.push_str(&line[last_end..]);
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    Ok(result)
}
