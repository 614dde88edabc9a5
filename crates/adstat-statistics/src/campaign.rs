//! Campaign listing payload

use adstat_core::types::CampaignId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One campaign as returned by the `my-campaigns` endpoint
///
/// Only the id and name are interpreted. Everything else the API sends is
/// kept in `extra` so `adstat campaigns --json` can show it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Upstream campaign identifier
    pub id: CampaignId,
    /// Campaign name as known upstream
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    /// Name to show for this campaign, falling back to its id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
