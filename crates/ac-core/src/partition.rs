//! Grouping of classified records into presentation buckets.

use chrono::NaiveDateTime;

use crate::classify::{Classification, classify};
use crate::record::{ActivityRecord, Category, ParseError};

/// A record paired with its classification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRow<'a> {
    pub record: &'a ActivityRecord,
    pub outcome: Result<Classification, ParseError>,
}

impl ClassifiedRow<'_> {
    /// Delay predicate with the conservative default: rows that failed to
    /// classify are never delayed.
    pub fn is_delayed(&self) -> bool {
        self.outcome
            .as_ref()
            .is_ok_and(Classification::is_delayed)
    }
}

/// Records grouped for presentation.
///
/// `main` and `parallel` are disjoint. `delayed` is a derived view whose rows
/// also appear in one of the other two buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets<'a> {
    pub main: Vec<ClassifiedRow<'a>>,
    pub parallel: Vec<ClassifiedRow<'a>>,
    pub delayed: Vec<ClassifiedRow<'a>>,
}

/// Splits records into Main and Parallel buckets and collects the delayed ones.
///
/// Source order is preserved within each bucket. Delayed rows from Main come
/// before delayed rows from Parallel. Records with an unknown key are left out.
pub fn partition(records: &[ActivityRecord], now: NaiveDateTime) -> Buckets<'_> {
    let mut buckets = Buckets::default();

    for record in records {
        let Some(category) = record.category() else {
            tracing::trace!(code = record.code(), key = %record.key, "skipping unclassified activity");
            continue;
        };

        let outcome = classify(record, now);
        if let Err(err) = &outcome {
            tracing::warn!(code = record.code(), error = %err, "failed to classify activity, treating as not delayed");
        }

        let row = ClassifiedRow { record, outcome };
        match category {
            Category::Main => buckets.main.push(row),
            Category::Parallel => buckets.parallel.push(row),
        }
    }

    buckets.delayed = buckets
        .main
        .iter()
        .chain(&buckets.parallel)
        .filter(|row| row.is_delayed())
        .cloned()
        .collect();

    tracing::debug!(
        main = buckets.main.len(),
        parallel = buckets.parallel.len(),
        delayed = buckets.delayed.len(),
        "partitioned activities"
    );

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::classify::Status;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(10, 20, 0)
            .unwrap()
    }

    fn record(code: &str, key: &str, actual_start: Option<&str>) -> ActivityRecord {
        ActivityRecord {
            code: Some(code.to_string()),
            activity: Some(format!("activity {code}")),
            key: key.to_string(),
            plan_start: "01/01/2025 09:00:00".to_string(),
            plan_end: "01/01/2025 10:00:00".to_string(),
            actual_start: actual_start.map(String::from),
            actual_end: None,
            columns: Vec::new(),
        }
    }

    const LATE: Option<&str> = Some("01/01/2025 09:10:00");
    const FRESH: Option<&str> = Some("01/01/2025 10:00:00");

    fn codes(rows: &[ClassifiedRow<'_>]) -> Vec<String> {
        rows.iter().map(|row| row.record.code().to_string()).collect()
    }

    #[test]
    fn splits_by_key_preserving_order() {
        let records = vec![
            record("M1", "Main", None),
            record("P1", "parallel", None),
            record("X1", "other", None),
            record("M2", "UTAMA", None),
            record("P2", "PARALEL", None),
        ];

        let buckets = partition(&records, now());
        assert_eq!(codes(&buckets.main), vec!["M1", "M2"]);
        assert_eq!(codes(&buckets.parallel), vec!["P1", "P2"]);
        assert!(buckets.delayed.is_empty());
    }

    #[test]
    fn delayed_lists_main_before_parallel() {
        let records = vec![
            record("P1", "parallel", LATE),
            record("M1", "main", LATE),
            record("M2", "main", FRESH),
            record("P2", "parallel", LATE),
            record("M3", "main", LATE),
        ];

        let buckets = partition(&records, now());
        assert_eq!(codes(&buckets.delayed), vec!["M1", "M3", "P1", "P2"]);
        assert!(buckets.delayed.iter().all(ClassifiedRow::is_delayed));
    }

    #[test]
    fn malformed_row_does_not_affect_others() {
        let mut broken = record("M2", "main", LATE);
        broken.plan_start = "not-a-date".to_string();
        let records = vec![record("M1", "main", LATE), broken, record("M3", "main", FRESH)];

        let buckets = partition(&records, now());
        assert_eq!(buckets.main.len(), 3);
        assert!(buckets.main[1].outcome.is_err());
        assert_eq!(
            buckets.main[2].outcome.as_ref().unwrap().status,
            Status::OnTrack
        );
        assert_eq!(codes(&buckets.delayed), vec!["M1"]);
    }

    #[test]
    fn row_without_code_column_becomes_row_error() {
        let records = vec![ActivityRecord::from_row(&[
            ("Key".to_string(), "main".to_string()),
            ("Activity".to_string(), "Backup".to_string()),
            ("Plan Start".to_string(), "01/01/2025 09:00:00".to_string()),
            ("Plan End".to_string(), "01/01/2025 10:00:00".to_string()),
            ("Actual Start".to_string(), "01/01/2025 09:10:00".to_string()),
        ])];

        let buckets = partition(&records, now());
        assert_eq!(buckets.main.len(), 1);
        assert_eq!(
            buckets.main[0].outcome,
            Err(ParseError::MissingField { field: "Code" })
        );
        assert!(!buckets.main[0].is_delayed());
        assert!(buckets.delayed.is_empty());
    }

    #[test]
    fn partition_is_idempotent() {
        let records = vec![
            record("M1", "main", LATE),
            record("P1", "parallel", FRESH),
            record("P2", "parallel", None),
        ];

        assert_eq!(partition(&records, now()), partition(&records, now()));
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let buckets = partition(&[], now());
        assert_eq!(buckets, Buckets::default());
    }
}
