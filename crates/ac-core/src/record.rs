//! Activity records as read from the data source.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp format used by every date column of the sheet (`DD/MM/YYYY HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Column names as they appear in the sheet header.
pub mod columns {
    pub const KEY: &str = "Key";
    pub const CODE: &str = "Code";
    pub const ACTIVITY: &str = "Activity";
    pub const PLAN_START: &str = "Plan Start";
    pub const PLAN_END: &str = "Plan End";
    pub const ACTUAL_START: &str = "Actual Start";
    pub const ACTUAL_END: &str = "Actual End";
}

/// Row-level errors raised while reading an activity's timestamps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required column was absent or empty.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A timestamp column did not match [`TIMESTAMP_FORMAT`].
    #[error("{field} '{value}' is not a DD/MM/YYYY HH:MM:SS timestamp")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parses a sheet timestamp, naming the column in the error.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, ParseError> {
    if value.is_empty() {
        return Err(ParseError::MissingField { field });
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        ParseError::InvalidTimestamp {
            field,
            value: value.to_string(),
            source,
        }
    })
}

/// Presentation bucket an activity belongs to, derived from its `Key` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Main,
    Parallel,
}

impl Category {
    /// Routes a `Key` value, case-insensitively.
    ///
    /// Both the English and Indonesian spellings are accepted ("main"/"utama",
    /// "parallel"/"paralel"). Any other value is unclassified.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "main" | "utama" => Some(Self::Main),
            "parallel" | "paralel" => Some(Self::Parallel),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scheduled activity.
///
/// Timestamps are kept as the raw sheet strings; they are parsed during
/// classification so that a malformed value only affects its own row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Short identifier shown as the card title. `None` when the column is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Free-text activity label. `None` when the column is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,

    /// Category tag (see [`Category::from_key`]).
    pub key: String,

    /// Planned start, `DD/MM/YYYY HH:MM:SS`.
    pub plan_start: String,

    /// Planned end, `DD/MM/YYYY HH:MM:SS`.
    pub plan_end: String,

    /// Observed start. `None` means the activity has not started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<String>,

    /// Observed end. `None` means the activity has not finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end: Option<String>,

    /// Every column of the source row, in sheet order.
    #[serde(skip)]
    pub columns: Vec<(String, String)>,
}

impl ActivityRecord {
    /// Builds a record from a sheet row of `(column, value)` pairs.
    ///
    /// `Code` and `Activity` keep absence distinct from an empty cell; other
    /// absent columns read as empty. Empty `Actual Start`/`Actual End` become `None`.
    pub fn from_row(row: &[(String, String)]) -> Self {
        let present = |name: &str| {
            row.iter()
                .find(|(column, _)| column == name)
                .map(|(_, value)| value.clone())
        };
        let get = |name: &str| present(name).unwrap_or_default();
        let optional = |name: &str| present(name).filter(|value| !value.is_empty());

        Self {
            code: present(columns::CODE),
            activity: present(columns::ACTIVITY),
            key: get(columns::KEY),
            plan_start: get(columns::PLAN_START),
            plan_end: get(columns::PLAN_END),
            actual_start: optional(columns::ACTUAL_START),
            actual_end: optional(columns::ACTUAL_END),
            columns: row.to_vec(),
        }
    }

    /// The activity code, empty when the column is absent.
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    /// The activity label, empty when the column is absent.
    pub fn activity(&self) -> &str {
        self.activity.as_deref().unwrap_or_default()
    }

    /// The bucket this record routes to, if any.
    pub fn category(&self) -> Option<Category> {
        Category::from_key(&self.key)
    }

    /// Columns shown in the table view: everything except `Actual End`.
    pub fn table_columns(&self) -> impl Iterator<Item = &(String, String)> {
        self.columns
            .iter()
            .filter(|(column, _)| column != columns::ACTUAL_END)
    }
}
