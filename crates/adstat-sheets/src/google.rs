//! Google Sheets backend
//!
//! Talks to the Sheets REST API v4 directly:
//!
//! - `GET  spreadsheets/{key}?fields=sheets.properties.title` lists worksheets
//! - `POST spreadsheets/{key}:batchUpdate` with an `addSheet` request
//! - `POST spreadsheets/{key}/values/{range}:append` appends a row

use crate::auth::{ServiceAccountAuth, bearer};
use crate::backend::{CellValue, SpreadsheetBackend};
use adstat_core::error::{AdstatError, Result};
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tracing::{debug, info};

/// Production endpoint of the Sheets API
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

enum Authorization {
    ServiceAccount(ServiceAccountAuth),
    Static(String),
}

/// One spreadsheet in Google Sheets, addressed by its key
pub struct GoogleSheets {
    client: reqwest::Client,
    api_base: Url,
    spreadsheet_key: String,
    auth: Authorization,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

impl GoogleSheets {
    /// Authorize with a service-account key file and open a spreadsheet
    ///
    /// Fails with a configuration error when the key cannot be loaded, a
    /// token cannot be obtained, or the spreadsheet cannot be opened.
    pub async fn connect(key_path: &Path, spreadsheet_key: &str) -> Result<Self> {
        let auth = ServiceAccountAuth::from_key_file(key_path).await?;
        Self::open(
            SHEETS_API_BASE,
            spreadsheet_key,
            Authorization::ServiceAccount(auth),
        )
        .await
    }

    /// Open a spreadsheet on an explicit endpoint with a fixed access token
    pub async fn connect_with_token(
        api_base: &str,
        spreadsheet_key: &str,
        token: &str,
    ) -> Result<Self> {
        Self::open(
            api_base,
            spreadsheet_key,
            Authorization::Static(bearer(token.to_string())),
        )
        .await
    }

    async fn open(api_base: &str, spreadsheet_key: &str, auth: Authorization) -> Result<Self> {
        let api_base = Url::parse(api_base).map_err(|e| {
            AdstatError::Configuration(format!("Invalid spreadsheet API URL '{api_base}': {e}"))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(AdstatError::Configuration(format!(
                "Invalid spreadsheet API URL '{api_base}'"
            )));
        }

        let mut sheets = Self {
            client: reqwest::Client::new(),
            api_base,
            spreadsheet_key: spreadsheet_key.to_string(),
            auth,
        };

        // Opening the spreadsheet up front turns bad credentials or a wrong
        // key into a startup failure.
        let titles = sheets.list_worksheets().await.map_err(|e| match e {
            AdstatError::Sink(msg) => AdstatError::Configuration(format!(
                "Cannot open spreadsheet '{spreadsheet_key}': {msg}"
            )),
            other => other,
        })?;
        info!(
            "Opened spreadsheet {} ({} worksheets)",
            spreadsheet_key,
            titles.len()
        );

        Ok(sheets)
    }

    /// Build `{api_base}/spreadsheets/{key}` followed by extra segments
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        // `open` rejected cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("spreadsheets");
            match segments.split_first() {
                None => {
                    path.push(&self.spreadsheet_key);
                }
                Some((first, rest)) if first.starts_with(':') => {
                    path.push(&format!("{}{}", self.spreadsheet_key, first));
                    path.extend(rest);
                }
                Some(_) => {
                    path.push(&self.spreadsheet_key);
                    path.extend(segments);
                }
            }
        }
        url
    }

    async fn authorization(&self) -> Result<String> {
        match &self.auth {
            Authorization::ServiceAccount(auth) => auth.authorization_header().await,
            Authorization::Static(value) => Ok(value.clone()),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .header(AUTHORIZATION, self.authorization().await?)
            .send()
            .await
            .map_err(|e| AdstatError::Sink(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdstatError::Sink(format!("HTTP {}: {}", status.as_u16(), body)));
        }
        Ok(response)
    }
}

/// A1 range covering a whole worksheet, quoted for titles with spaces
fn sheet_range(title: &str) -> String {
    format!("'{}'!A1", title.replace('\'', "''"))
}

#[async_trait]
impl SpreadsheetBackend for GoogleSheets {
    async fn list_worksheets(&mut self) -> Result<Vec<String>> {
        let request = self
            .client
            .get(self.url(&[]))
            .query(&[("fields", "sheets.properties.title")]);
        let response = self.send(request).await?;
        let metadata: SpreadsheetMetadata = response
            .json()
            .await
            .map_err(|e| AdstatError::Sink(format!("Unexpected spreadsheet metadata: {e}")))?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    async fn add_worksheet(&mut self, title: &str, rows: u32, columns: u32) -> Result<()> {
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": { "rowCount": rows, "columnCount": columns }
                    }
                }
            }]
        });
        let request = self.client.post(self.url(&[":batchUpdate"])).json(&body);
        self.send(request).await?;
        debug!("Added worksheet {} ({}x{})", title, rows, columns);
        Ok(())
    }

    async fn append_row(&mut self, title: &str, cells: Vec<CellValue>) -> Result<()> {
        let range = format!("{}:append", sheet_range(title));
        let request = self
            .client
            .post(self.url(&["values", range.as_str()]))
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [cells] }));
        self.send(request).await?;
        Ok(())
    }
}
