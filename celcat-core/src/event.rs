//! Calendar events produced from a timetable.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Status written on every generated event.
pub const STATUS_CONFIRMED: &str = "CONFIRMED";

/// A normalized calendar event, ready for ICS serialization.
///
/// `start` and `end` are local wall-clock times in the calendar's timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEvent {
    pub uid: String,
    /// Course name
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub status: &'static str,
}
