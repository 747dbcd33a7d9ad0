//! Status command: one fetch, printed as sections or JSON.

use std::io::Write;

use ac_core::countdown::countdown_text;
use ac_core::{ActivityRecord, ClassifiedRow, Status};
use ac_sheets::RowSource;
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::Config;
use crate::commands::util::{dashboard, fetch_once, local_now};
use crate::render::text::format_dashboard;

/// JSON status structure.
#[derive(Debug, Serialize)]
pub struct JsonStatus {
    pub generated_at: String,
    pub main: Vec<JsonActivity>,
    pub parallel: Vec<JsonActivity>,
    pub delayed: Vec<JsonActivity>,
}

#[derive(Debug, Serialize)]
pub struct JsonActivity {
    pub code: String,
    pub activity: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<String>,
    /// Signed seconds until the expected end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JsonActivity {
    fn from_row(row: &ClassifiedRow<'_>) -> Self {
        let mut activity = Self {
            code: row.record.code().to_string(),
            activity: row.record.activity().to_string(),
            key: row.record.key.clone(),
            status: None,
            countdown: None,
            remaining_secs: None,
            expected_end: None,
            error: None,
        };
        match &row.outcome {
            Ok(classification) => {
                activity.status = Some(classification.status);
                activity.countdown = Some(countdown_text(classification));
                activity.remaining_secs = classification.remaining.map(|d| d.num_seconds());
                activity.expected_end = classification
                    .expected_end
                    .map(|t| t.format(ac_core::TIMESTAMP_FORMAT).to_string());
            }
            Err(err) => activity.error = Some(err.to_string()),
        }
        activity
    }
}

fn json_rows(rows: &[ClassifiedRow<'_>]) -> Vec<JsonActivity> {
    rows.iter().map(JsonActivity::from_row).collect()
}

/// Formats the status of `records` at `now`.
pub fn format_status(
    title: &str,
    records: &[ActivityRecord],
    now: NaiveDateTime,
    json: bool,
) -> Result<String> {
    let dashboard = dashboard(title, records, now, None);
    if !json {
        return Ok(format_dashboard(&dashboard));
    }

    let status = JsonStatus {
        generated_at: dashboard.generated_at_text(),
        main: json_rows(&dashboard.buckets.main),
        parallel: json_rows(&dashboard.buckets.parallel),
        delayed: json_rows(&dashboard.buckets.delayed),
    };
    Ok(serde_json::to_string_pretty(&status)? + "\n")
}

/// Runs the status command.
pub fn run<W: Write>(
    writer: &mut W,
    source: &dyn RowSource,
    config: &Config,
    json: bool,
) -> Result<()> {
    let snapshot = fetch_once(source)?;
    let output = format_status(&config.title, &snapshot.records, local_now(), json)?;
    write!(writer, "{output}")?;
    Ok(())
}
