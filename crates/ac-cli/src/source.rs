//! Row source selection from configuration.

use anyhow::{Context, Result, bail};
use ac_sheets::{Credential, JsonFileSource, RowSource, SheetsClient};

use crate::Config;

/// Builds the row source described by `config`.
///
/// A configured `source_file` wins over the Sheets API. For the API, an access
/// token is preferred over an API key.
pub fn build_source(config: &Config) -> Result<Box<dyn RowSource>> {
    if let Some(path) = &config.source_file {
        return Ok(Box::new(JsonFileSource::new(path)));
    }

    let spreadsheet_id = config
        .spreadsheet_id
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .context("missing spreadsheet ID (set AC_SPREADSHEET_ID or config.toml)")?;

    let non_empty = |secret: &Option<String>| {
        secret
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    };
    let credential = match (non_empty(&config.access_token), non_empty(&config.api_key)) {
        (Some(token), _) => Credential::AccessToken(token),
        (None, Some(key)) => Credential::ApiKey(key),
        (None, None) => {
            bail!("missing Sheets credential (set AC_API_KEY or AC_ACCESS_TOKEN or config.toml)")
        }
    };

    let client = SheetsClient::new(spreadsheet_id, config.worksheet.clone(), credential)
        .context("failed to create Sheets client")?
        .with_base_url(config.sheets_base_url.clone());
    Ok(Box::new(client))
}
