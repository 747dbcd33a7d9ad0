//! Core domain logic for the activity countdown dashboard.
//!
//! This crate contains the fundamental types and logic for:
//! - Records: activity rows as read from the data source
//! - Classification: lifecycle status and countdown per activity
//! - Partitioning: grouping classified rows into Main/Parallel/Delayed buckets

mod classify;
pub mod countdown;
mod partition;
pub mod record;

pub use classify::{Classification, Status, classify};
pub use partition::{Buckets, ClassifiedRow, partition};
pub use record::{ActivityRecord, Category, ParseError, TIMESTAMP_FORMAT, parse_timestamp};
