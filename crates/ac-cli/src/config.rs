//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spreadsheet ID (the long token in the sheet URL).
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// Worksheet (tab) name to read.
    pub worksheet: String,

    /// Sheets API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// OAuth2 access token. Takes precedence over `api_key`.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Read rows from this JSON file instead of the Sheets API.
    #[serde(default)]
    pub source_file: Option<PathBuf>,

    /// Seconds between dashboard refreshes.
    pub refresh_secs: u64,

    /// Dashboard title.
    pub title: String,

    /// Sheets API endpoint.
    pub sheets_base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Config")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .field("api_key", &redact(&self.api_key))
            .field("access_token", &redact(&self.access_token))
            .field("source_file", &self.source_file)
            .field("refresh_secs", &self.refresh_secs)
            .field("title", &self.title)
            .field("sheets_base_url", &self.sheets_base_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            worksheet: "Sheet1".to_string(),
            api_key: None,
            access_token: None,
            source_file: None,
            refresh_secs: 60,
            title: "Dashboard Countdown Activity".to_string(),
            sheets_base_url: ac_sheets::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (AC_*)
        figment = figment.merge(Env::prefixed("AC_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ac.
///
/// On Linux: `~/.config/ac`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ac"))
}
