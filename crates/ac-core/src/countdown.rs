//! Countdown text formatting.

use chrono::TimeDelta;

use crate::classify::Classification;

/// Placeholder shown instead of a countdown for activities that have not started.
pub const NOT_STARTED_LABEL: &str = "Not Started";

/// Formats a duration as `H:MM:SS`, or `N day(s), H:MM:SS` past 24 hours.
///
/// Sub-second precision is truncated toward zero. Negative durations are
/// rendered as `-` followed by their magnitude.
pub fn format_countdown(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    match days {
        0 => format!("{sign}{hours}:{minutes:02}:{seconds:02}"),
        1 => format!("{sign}1 day, {hours}:{minutes:02}:{seconds:02}"),
        _ => format!("{sign}{days} days, {hours}:{minutes:02}:{seconds:02}"),
    }
}

/// Display text for a classification's countdown.
///
/// Delayed activities show the overrun with a leading `-`.
pub fn countdown_text(classification: &Classification) -> String {
    match classification.reported() {
        None => NOT_STARTED_LABEL.to_string(),
        Some(overrun) if classification.is_delayed() => format!("-{}", format_countdown(overrun)),
        Some(remaining) => format_countdown(remaining),
    }
}
