//! Row sources for the activity countdown dashboard.
//!
//! A source yields the worksheet as an ordered list of rows, each row an
//! ordered list of `(column, value)` pairs keyed by the header row:
//! - [`SheetsClient`]: Google Sheets API v4 `values.get`
//! - [`JsonFileSource`]: a local JSON export, for offline use

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod file;
mod sheets;

pub use file::JsonFileSource;
pub use sheets::{Credential, DEFAULT_BASE_URL, SheetsClient};

/// One worksheet row as `(column, value)` pairs in header order.
pub type Row = Vec<(String, String)>;

/// Errors raised while fetching rows. These fail a whole refresh cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A required credential was empty.
    #[error("invalid credential: {reason}")]
    InvalidCredential { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// The configured base URL could not be used.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// The payload did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// Reading a local source failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A supplier of worksheet rows, queried once per refresh cycle.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetches every data row of the worksheet.
    async fn fetch_rows(&self) -> Result<Vec<Row>, FetchError>;

    /// Human-readable name of the source for logs and status lines.
    fn describe(&self) -> String;
}

/// Zips a header with value rows, padding short rows and skipping blank ones.
pub(crate) fn rows_from_table(mut table: Vec<Vec<Value>>) -> Vec<Row> {
    if table.is_empty() {
        return Vec::new();
    }
    let header: Vec<String> = table.remove(0).iter().map(cell_text).collect();

    table
        .into_iter()
        .filter(|cells| cells.iter().any(|cell| !cell_text(cell).is_empty()))
        .map(|cells| {
            header
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let value = cells.get(i).map(cell_text).unwrap_or_default();
                    (column.clone(), value)
                })
                .collect::<Row>()
        })
        .collect()
}

/// Text of a single cell. Numbers and booleans are stringified, null is empty.
pub(crate) fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn table(value: Value) -> Vec<Vec<Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rows_are_keyed_by_header() {
        let rows = rows_from_table(table(json!([
            ["Key", "Code", "Plan Start"],
            ["Main", "A1", "01/01/2025 09:00:00"],
        ])));

        assert_eq!(
            rows,
            vec![vec![
                ("Key".to_string(), "Main".to_string()),
                ("Code".to_string(), "A1".to_string()),
                ("Plan Start".to_string(), "01/01/2025 09:00:00".to_string()),
            ]]
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let rows = rows_from_table(table(json!([
            ["Code", "Actual Start", "Actual End"],
            ["A1"],
        ])));
        assert_eq!(rows[0][1], ("Actual Start".to_string(), String::new()));
        assert_eq!(rows[0][2], ("Actual End".to_string(), String::new()));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let rows = rows_from_table(table(json!([
            ["Code"],
            [""],
            [],
            ["A2"],
        ])));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].1, "A2");
    }

    #[test]
    fn header_only_and_empty_tables_yield_no_rows() {
        assert!(rows_from_table(Vec::new()).is_empty());
        assert!(rows_from_table(table(json!([["Code", "Key"]]))).is_empty());
    }

    #[test]
    fn cell_text_stringifies_scalars() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("x")), "x");
        assert_eq!(cell_text(&json!(12)), "12");
        assert_eq!(cell_text(&json!(true)), "true");
    }
}
