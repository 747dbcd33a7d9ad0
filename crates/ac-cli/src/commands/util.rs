//! Shared utilities for CLI commands.

use ac_core::{ActivityRecord, partition};
use ac_sheets::RowSource;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

use crate::render::Dashboard;
use crate::snapshot::{Snapshot, fetch_snapshot};

/// Reference instant for classification: local wall-clock time, matching the
/// zone-less timestamps in the sheet.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Fetches one snapshot, driving the async source on a fresh runtime.
pub fn fetch_once(source: &dyn RowSource) -> Result<Snapshot> {
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    runtime
        .block_on(fetch_snapshot(source))
        .with_context(|| format!("failed to fetch activities from {}", source.describe()))
}

/// Classifies and groups `records` for the presenters.
pub fn dashboard<'a>(
    title: &'a str,
    records: &'a [ActivityRecord],
    now: NaiveDateTime,
    notice: Option<String>,
) -> Dashboard<'a> {
    Dashboard {
        title,
        generated_at: now,
        buckets: partition(records, now),
        records,
        notice,
    }
}
