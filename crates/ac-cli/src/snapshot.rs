//! Fetched snapshots and last-good-snapshot retention across refresh cycles.

use ac_core::ActivityRecord;
use ac_sheets::{FetchError, Row, RowSource};
use chrono::{DateTime, Local};

/// All activity records from one successful fetch.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<ActivityRecord>,
    pub fetched_at: DateTime<Local>,
}

impl Snapshot {
    pub fn from_rows(rows: &[Row], fetched_at: DateTime<Local>) -> Self {
        Self {
            records: rows.iter().map(|row| ActivityRecord::from_row(row)).collect(),
            fetched_at,
        }
    }
}

/// Fetches every row from `source` and converts them to records.
pub async fn fetch_snapshot(source: &dyn RowSource) -> Result<Snapshot, FetchError> {
    let rows = source.fetch_rows().await?;
    Ok(Snapshot::from_rows(&rows, Local::now()))
}

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// The fetch succeeded.
    Fresh,
    /// The fetch failed; the previous snapshot (if any) is still shown.
    Stale { error: String },
}

impl Freshness {
    /// Banner text for a failed cycle. `None` when fresh.
    pub fn notice(&self, snapshot: Option<&Snapshot>) -> Option<String> {
        let Self::Stale { error } = self else {
            return None;
        };
        Some(match snapshot {
            Some(snapshot) => format!(
                "Data source unavailable ({error}); showing data fetched at {}",
                snapshot.fetched_at.format("%d/%m/%Y %H:%M:%S")
            ),
            None => format!("Data source unavailable: {error}"),
        })
    }
}

/// Runs fetches for the refresh loop, keeping the last successful snapshot.
pub struct Refresher<'a> {
    source: &'a dyn RowSource,
    last_good: Option<Snapshot>,
}

impl<'a> Refresher<'a> {
    pub fn new(source: &'a dyn RowSource) -> Self {
        Self {
            source,
            last_good: None,
        }
    }

    /// Fetches a new snapshot. On failure the previous snapshot is retained.
    pub async fn refresh(&mut self) -> Freshness {
        match fetch_snapshot(self.source).await {
            Ok(snapshot) => {
                tracing::debug!(records = snapshot.records.len(), "refreshed snapshot");
                self.last_good = Some(snapshot);
                Freshness::Fresh
            }
            Err(err) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    error = %err,
                    retained = self.last_good.is_some(),
                    "fetch failed, keeping last snapshot"
                );
                Freshness::Stale {
                    error: err.to_string(),
                }
            }
        }
    }

    /// The most recent successful snapshot.
    pub const fn snapshot(&self) -> Option<&Snapshot> {
        self.last_good.as_ref()
    }
}
