//! Google Sheets API v4 row source.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::{FetchError, Row, RowSource, rows_from_table};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Production endpoint of the Sheets API.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// How requests are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// API key, sufficient for sheets shared by link.
    ApiKey(String),
    /// OAuth2 access token, e.g. minted for a service account.
    AccessToken(String),
}

impl Credential {
    fn secret(&self) -> &str {
        match self {
            Self::ApiKey(secret) | Self::AccessToken(secret) => secret,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
            Self::AccessToken(_) => f.write_str("AccessToken([REDACTED])"),
        }
    }
}

/// Client for one worksheet of one spreadsheet.
///
/// Constructed once at startup and reused for every refresh cycle. Clones share
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    credential: Credential,
}

impl fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsClient")
            .field("base_url", &self.base_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    /// Creates a client for `worksheet` of `spreadsheet_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
        credential: Credential,
    ) -> Result<Self, FetchError> {
        if credential.secret().trim().is_empty() {
            return Err(FetchError::InvalidCredential {
                reason: "credential cannot be empty",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
            credential,
        })
    }

    /// Points the client at another endpoint (used by tests and proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn values_url(&self) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|err| FetchError::InvalidUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                self.worksheet.as_str(),
            ]);
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn parse_api_error(status: u16, body: &str) -> Option<FetchError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| FetchError::Api {
            status,
            message: payload.error.message,
        })
}

#[async_trait]
impl RowSource for SheetsClient {
    async fn fetch_rows(&self) -> Result<Vec<Row>, FetchError> {
        let url = self.values_url()?;
        let request = self.http.get(url);
        let request = match &self.credential {
            Credential::ApiKey(key) => request.query(&[("key", key.as_str())]),
            Credential::AccessToken(token) => request.bearer_auth(token),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(
                parse_api_error(status.as_u16(), &body).unwrap_or_else(|| FetchError::Api {
                    status: status.as_u16(),
                    message: body,
                }),
            );
        }

        let payload: ValueRange = serde_json::from_str(&body)
            .map_err(|err| FetchError::InvalidResponse(err.to_string()))?;
        let rows = rows_from_table(payload.values);
        tracing::debug!(rows = rows.len(), worksheet = %self.worksheet, "fetched worksheet");
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("sheet {}/{}", self.spreadsheet_id, self.worksheet)
    }
}
