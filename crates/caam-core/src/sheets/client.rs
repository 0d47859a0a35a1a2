//! HTTP client for the Google Sheets v4 values API.
//!
//! Sheets are read with a static API key, so only publicly shared (or
//! key-authorized) spreadsheets are reachable. Each call is a single GET
//! with no retry.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::source::{RawRow, SheetSource};
use crate::error::SheetError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the spreadsheet values endpoint
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    range: Option<String>,
    #[serde(rename = "majorDimension", default)]
    major_dimension: Option<String>,
    // Omitted entirely when the range holds no data
    #[serde(default)]
    values: Vec<RawRow>,
}

/// Sheets API client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: SHEETS_BASE_URL.to_string(),
        })
    }

    /// Point the client at another host, e.g. a local stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the values URL. Sheet id and range go in as encoded path segments.
    fn values_url(&self, sheet_id: &str, range: &str) -> Result<Url, SheetError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SheetError::InvalidResponse(format!("Bad base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::InvalidResponse("Base URL cannot hold a path".to_string()))?
            .push(sheet_id)
            .push("values")
            .push(range);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, SheetError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(SheetError::from_status(status, &body))
        }
    }

    /// Fetch every row of `range` in `sheet_id`.
    pub async fn fetch_values(&self, sheet_id: &str, range: &str) -> Result<Vec<RawRow>, SheetError> {
        let url = self.values_url(sheet_id, range)?;

        let response = self.client.get(url).send().await?;
        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        let parsed: ValueRange = serde_json::from_str(&text)
            .map_err(|e| SheetError::InvalidResponse(format!("Failed to parse values response: {}", e)))?;

        debug!(
            sheet_id = %sheet_id,
            range = parsed.range.as_deref().unwrap_or(range),
            dimension = parsed.major_dimension.as_deref().unwrap_or("ROWS"),
            rows = parsed.values.len(),
            "Fetched sheet values"
        );

        Ok(parsed.values)
    }
}

impl SheetSource for SheetsClient {
    async fn fetch_range(&self, sheet_id: &str, range: &str) -> Result<Vec<RawRow>, SheetError> {
        self.fetch_values(sheet_id, range).await
    }
}
