//! Presentation of classified activities.
//!
//! Both presenters work from the same view model: cards grouped into the
//! Main, Parallel and Delay sections, plus a table of every activity.

use ac_core::countdown::countdown_text;
use ac_core::{ActivityRecord, Buckets, ClassifiedRow, Status};
use chrono::NaiveDateTime;

pub mod html;
pub mod text;

/// Display format for the generation timestamp.
const GENERATED_AT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Columns used by the Parallel and Delay sections.
pub const DEFAULT_COLUMNS: usize = 3;

/// Everything a presenter needs for one refresh cycle.
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub title: &'a str,
    pub generated_at: NaiveDateTime,
    pub buckets: Buckets<'a>,
    pub records: &'a [ActivityRecord],
    /// Staleness or fetch-failure banner.
    pub notice: Option<String>,
}

impl Dashboard<'_> {
    pub fn generated_at_text(&self) -> String {
        self.generated_at.format(GENERATED_AT_FORMAT).to_string()
    }
}

/// One activity card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Activity(ActivityCard),
    /// The row could not be classified; `message` is the raw error text.
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub code: String,
    pub activity: String,
    pub countdown: String,
    pub status: Status,
    pub plan_start: String,
    pub plan_end: String,
    pub actual_start: String,
}

impl ActivityCard {
    /// Status badge; blank for activities that have not started.
    pub const fn label(&self) -> &'static str {
        match self.status {
            Status::NotStarted => "",
            Status::OnTrack => "[On Track]",
            Status::Delayed => "[Delay]",
            Status::Finished => "[Finished]",
        }
    }

    pub const fn is_delayed(&self) -> bool {
        matches!(self.status, Status::Delayed)
    }
}

impl Card {
    pub fn from_row(row: &ClassifiedRow<'_>) -> Self {
        let record = row.record;
        match &row.outcome {
            Ok(classification) => Self::Activity(ActivityCard {
                code: record.code().to_string(),
                activity: record.activity().to_string(),
                countdown: countdown_text(classification),
                status: classification.status,
                plan_start: record.plan_start.clone(),
                plan_end: record.plan_end.clone(),
                actual_start: record
                    .actual_start
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            }),
            Err(err) => Self::Error {
                message: err.to_string(),
            },
        }
    }
}

/// A titled grid of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub columns: usize,
    pub cards: Vec<Card>,
}

/// Grid width for the Main section: a single large card, two columns for up
/// to four activities, three beyond that.
pub const fn main_columns(count: usize) -> usize {
    match count {
        0 | 1 => 1,
        2..=4 => 2,
        _ => DEFAULT_COLUMNS,
    }
}

fn cards(rows: &[ClassifiedRow<'_>]) -> Vec<Card> {
    rows.iter().map(Card::from_row).collect()
}

/// The three card sections, in display order.
pub fn sections(buckets: &Buckets<'_>) -> [Section; 3] {
    [
        Section {
            title: "Main Activity",
            columns: main_columns(buckets.main.len()),
            cards: cards(&buckets.main),
        },
        Section {
            title: "Parallel Activity",
            columns: DEFAULT_COLUMNS,
            cards: cards(&buckets.parallel),
        },
        Section {
            title: "Delay Activity",
            columns: DEFAULT_COLUMNS,
            cards: cards(&buckets.delayed),
        },
    ]
}

/// Title of the table section.
pub const TABLE_TITLE: &str = "Table Activity";

/// Every activity, numbered from 1, without the `Actual End` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    /// `(row number, cells)`; cells line up with `headers`.
    pub rows: Vec<(usize, Vec<String>)>,
}

impl Table {
    /// Builds the table over all records, including unclassified ones.
    ///
    /// Headers are the union of the records' columns in first-seen order.
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for record in records {
            for (column, _) in record.table_columns() {
                if !headers.contains(column) {
                    headers.push(column.clone());
                }
            }
        }

        let rows = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let cells = headers
                    .iter()
                    .map(|header| {
                        record
                            .table_columns()
                            .find(|(column, _)| column == header)
                            .map(|(_, value)| value.clone())
                            .unwrap_or_default()
                    })
                    .collect();
                (i + 1, cells)
            })
            .collect();

        Self { headers, rows }
    }
}
