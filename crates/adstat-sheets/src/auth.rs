//! Service-account authorization for the Google Sheets API
//!
//! A service-account key file is exchanged for OAuth access tokens scoped
//! to spreadsheets and drive. Token refresh is handled by the token source.

use adstat_core::error::{AdstatError, Result};
use google_cloud_auth::credentials::CredentialsFile;
use google_cloud_token::{TokenSource, TokenSourceProvider};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// OAuth scopes requested for the service account
pub const SHEETS_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

/// Access-token source backed by a service-account key
pub struct ServiceAccountAuth {
    source: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for ServiceAccountAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountAuth").finish_non_exhaustive()
    }
}

impl ServiceAccountAuth {
    /// Load a service-account key file
    pub async fn from_key_file(key_path: &Path) -> Result<Self> {
        let key_json = tokio::fs::read_to_string(key_path).await.map_err(|e| {
            AdstatError::Configuration(format!(
                "Failed to read service account key file '{}': {}",
                key_path.display(),
                e
            ))
        })?;

        Self::from_key_json(&key_json).await
    }

    /// Build from the JSON content of a service-account key
    pub async fn from_key_json(json: &str) -> Result<Self> {
        let creds: CredentialsFile = serde_json::from_str(json).map_err(|e| {
            AdstatError::Configuration(format!("Failed to parse service account JSON: {}", e))
        })?;

        let config = google_cloud_auth::project::Config::default().with_scopes(&SHEETS_SCOPES);

        let provider = google_cloud_auth::token::DefaultTokenSourceProvider::new_with_credentials(
            config,
            Box::new(creds),
        )
        .await
        .map_err(|e| {
            AdstatError::Configuration(format!(
                "Failed to create token source from service account: {}",
                e
            ))
        })?;

        Ok(Self {
            source: provider.token_source(),
        })
    }

    /// Value for the `Authorization` header of a Sheets request
    pub async fn authorization_header(&self) -> Result<String> {
        let token = self
            .source
            .token()
            .await
            .map_err(|e| AdstatError::Sink(format!("Failed to get access token: {}", e)))?;
        debug!("Obtained spreadsheet access token");
        Ok(bearer(token))
    }
}

/// Normalize a token to a `Bearer` header value
///
/// Token sources may return either the raw token or an already prefixed
/// header value.
pub fn bearer(token: String) -> String {
    if token.starts_with("Bearer ") {
        token
    } else {
        format!("Bearer {token}")
    }
}
