//! Row classification: lifecycle status and countdown for one activity.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::record::{ActivityRecord, ParseError, columns, parse_timestamp};

/// Lifecycle state of an activity at a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No actual start recorded.
    NotStarted,
    /// In progress and not past its expected end.
    OnTrack,
    /// In progress and past its expected end.
    Delayed,
    /// Actual end recorded. Never reported as delayed, even if it finished late.
    Finished,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::OnTrack => "on_track",
            Self::Delayed => "delayed",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: Status,

    /// `actual_start + (plan_end - plan_start)`. `None` when not started.
    pub expected_end: Option<NaiveDateTime>,

    /// Signed `expected_end - now`. Negative once the expected end has passed.
    pub remaining: Option<TimeDelta>,
}

impl Classification {
    const fn not_started() -> Self {
        Self {
            status: Status::NotStarted,
            expected_end: None,
            remaining: None,
        }
    }

    pub const fn is_delayed(&self) -> bool {
        matches!(self.status, Status::Delayed)
    }

    /// Duration to display.
    ///
    /// Delayed activities report the overrun magnitude; everything else reports
    /// `remaining` unchanged, which is negative for an activity that finished late.
    pub fn reported(&self) -> Option<TimeDelta> {
        let remaining = self.remaining?;
        if self.is_delayed() {
            Some(remaining.abs())
        } else {
            Some(remaining)
        }
    }
}

/// Classifies an activity at `now`.
///
/// The `Code` and `Activity` columns must be present. Plan timestamps are
/// validated even for activities that have not started. `Actual End` is only
/// checked for presence; its value is never parsed.
pub fn classify(record: &ActivityRecord, now: NaiveDateTime) -> Result<Classification, ParseError> {
    if record.code.is_none() {
        return Err(ParseError::MissingField {
            field: columns::CODE,
        });
    }
    if record.activity.is_none() {
        return Err(ParseError::MissingField {
            field: columns::ACTIVITY,
        });
    }
    let plan_start = parse_timestamp(columns::PLAN_START, &record.plan_start)?;
    let plan_end = parse_timestamp(columns::PLAN_END, &record.plan_end)?;

    let Some(actual_start) = record.actual_start.as_deref() else {
        return Ok(Classification::not_started());
    };
    let actual_start = parse_timestamp(columns::ACTUAL_START, actual_start)?;

    let planned = plan_end - plan_start;
    let expected_end = actual_start + planned;
    let remaining = expected_end - now;

    let status = if record.actual_end.is_some() {
        Status::Finished
    } else if now > expected_end {
        Status::Delayed
    } else {
        Status::OnTrack
    };

    Ok(Classification {
        status,
        expected_end: Some(expected_end),
        remaining: Some(remaining),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn record(actual_start: Option<&str>, actual_end: Option<&str>) -> ActivityRecord {
        ActivityRecord {
            code: Some("A1".to_string()),
            activity: Some("Migrate database".to_string()),
            key: "main".to_string(),
            plan_start: "01/01/2025 09:00:00".to_string(),
            plan_end: "01/01/2025 10:00:00".to_string(),
            actual_start: actual_start.map(String::from),
            actual_end: actual_end.map(String::from),
            columns: Vec::new(),
        }
    }

    #[test]
    fn not_started_regardless_of_now() {
        let rec = record(None, None);
        for now in [at(0, 0), at(9, 30), at(23, 59)] {
            let result = classify(&rec, now).unwrap();
            assert_eq!(result.status, Status::NotStarted);
            assert_eq!(result.reported(), None);
            assert_eq!(result.expected_end, None);
        }
    }

    #[test]
    fn on_track_reports_countdown() {
        let rec = record(Some("01/01/2025 09:10:00"), None);
        let result = classify(&rec, at(10, 5)).unwrap();

        assert_eq!(result.status, Status::OnTrack);
        assert_eq!(result.expected_end, Some(at(10, 10)));
        assert_eq!(result.reported(), Some(TimeDelta::minutes(5)));
    }

    #[test]
    fn delayed_reports_overrun_magnitude() {
        let rec = record(Some("01/01/2025 09:10:00"), None);
        let result = classify(&rec, at(10, 20)).unwrap();

        assert_eq!(result.status, Status::Delayed);
        assert_eq!(result.remaining, Some(TimeDelta::minutes(-10)));
        assert_eq!(result.reported(), Some(TimeDelta::minutes(10)));
    }

    #[test]
    fn exactly_at_expected_end_is_on_track() {
        let rec = record(Some("01/01/2025 09:10:00"), None);
        let result = classify(&rec, at(10, 10)).unwrap();

        assert_eq!(result.status, Status::OnTrack);
        assert_eq!(result.reported(), Some(TimeDelta::zero()));
    }

    #[test]
    fn finished_is_never_delayed() {
        let rec = record(Some("01/01/2025 09:10:00"), Some("01/01/2025 12:00:00"));
        for now in [at(9, 30), at(10, 20), at(23, 59)] {
            let result = classify(&rec, now).unwrap();
            assert_eq!(result.status, Status::Finished);
            assert!(!result.is_delayed());
        }
    }

    #[test]
    fn finished_late_keeps_negative_remaining() {
        let rec = record(Some("01/01/2025 09:10:00"), Some("01/01/2025 10:30:00"));
        let result = classify(&rec, at(11, 0)).unwrap();
        assert_eq!(result.reported(), Some(TimeDelta::minutes(-50)));
    }

    #[test]
    fn actual_end_content_is_not_parsed() {
        let rec = record(Some("01/01/2025 09:10:00"), Some("done"));
        let result = classify(&rec, at(10, 20)).unwrap();
        assert_eq!(result.status, Status::Finished);
    }

    #[test]
    fn inverted_plan_yields_negative_duration_without_failing() {
        let mut rec = record(Some("01/01/2025 09:10:00"), None);
        rec.plan_start = "01/01/2025 10:00:00".to_string();
        rec.plan_end = "01/01/2025 09:00:00".to_string();

        let result = classify(&rec, at(9, 0)).unwrap();
        assert_eq!(result.expected_end, Some(at(8, 10)));
        assert_eq!(result.status, Status::Delayed);
    }

    #[test]
    fn malformed_plan_start_is_a_row_error() {
        let mut rec = record(Some("01/01/2025 09:10:00"), None);
        rec.plan_start = "not-a-date".to_string();

        let err = classify(&rec, at(10, 20)).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidTimestamp {
                field: "Plan Start",
                ..
            }
        ));
    }

    #[test]
    fn malformed_plan_fails_even_when_not_started() {
        let mut rec = record(None, None);
        rec.plan_end = "32/01/2025 10:00:00".to_string();
        assert!(classify(&rec, at(10, 0)).is_err());
    }

    #[test]
    fn missing_plan_end_is_reported() {
        let mut rec = record(Some("01/01/2025 09:10:00"), None);
        rec.plan_end = String::new();
        assert_eq!(
            classify(&rec, at(10, 0)),
            Err(ParseError::MissingField { field: "Plan End" })
        );
    }

    #[test]
    fn missing_code_column_is_reported() {
        let mut rec = record(Some("01/01/2025 09:10:00"), None);
        rec.code = None;
        assert_eq!(
            classify(&rec, at(10, 0)),
            Err(ParseError::MissingField { field: "Code" })
        );
    }

    #[test]
    fn missing_activity_column_is_reported() {
        let mut rec = record(None, None);
        rec.activity = None;
        assert_eq!(
            classify(&rec, at(10, 0)),
            Err(ParseError::MissingField { field: "Activity" })
        );
    }

    #[test]
    fn empty_code_is_not_missing() {
        let mut rec = record(None, None);
        rec.code = Some(String::new());
        assert_eq!(classify(&rec, at(10, 0)).unwrap().status, Status::NotStarted);
    }

    #[test]
    fn status_serde_uses_snake_case() {
        let json = serde_json::to_string(&Status::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");
        assert_eq!(Status::OnTrack.to_string(), "on_track");
    }
}
