//! Week-index resolution.
//!
//! CELCAT spans map a week index (`rawix`) to the date the week starts on.
//! Each event carries a fixed-width `rawweeks` string in which a `Y` marks
//! its week: a `Y` at position `i` (0-based) designates `rawix = i + 1`.
//! The event date is that week's start plus the event's `day` offset.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::error::{CelcatError, CelcatResult};
use crate::timetable::Span;

/// Marker designating an event's week in a raw week encoding.
const WEEK_MARKER: char = 'Y';

/// Mapping from week index to the start date of that week.
#[derive(Debug, Clone, Default)]
pub struct WeekMap {
    weeks: HashMap<u32, NaiveDate>,
}

impl WeekMap {
    /// Build the map from a document's spans.
    ///
    /// When several spans share a `rawix`, the last one wins.
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut weeks = HashMap::with_capacity(spans.len());
        for span in spans {
            if let Some(previous) = weeks.insert(span.raw_index, span.start_date) {
                tracing::debug!(
                    rawix = span.raw_index,
                    %previous,
                    replacement = %span.start_date,
                    "duplicate span index, keeping the last one"
                );
            }
        }
        WeekMap { weeks }
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Start date of the week with the given index
    pub fn week_start(&self, raw_index: u32) -> Option<NaiveDate> {
        self.weeks.get(&raw_index).copied()
    }

    /// Resolve a raw week encoding and a day offset to a calendar date.
    ///
    /// Only the first `Y` is considered when the encoding carries several.
    pub fn resolve(&self, raw_weeks: &str, day_offset: u32) -> CelcatResult<NaiveDate> {
        let raw_index = week_index(raw_weeks)?;
        let start = self
            .week_start(raw_index)
            .ok_or(CelcatError::KeyResolution(raw_index))?;

        start
            .checked_add_days(Days::new(u64::from(day_offset)))
            .ok_or_else(|| CelcatError::InvalidField {
                field: "day",
                value: day_offset.to_string(),
            })
    }
}

/// Week index designated by a raw week encoding (position of the first `Y`, 1-based)
pub fn week_index(raw_weeks: &str) -> CelcatResult<u32> {
    raw_weeks
        .chars()
        .position(|c| c == WEEK_MARKER)
        .and_then(|pos| u32::try_from(pos + 1).ok())
        .ok_or_else(|| CelcatError::MalformedWeekEncoding(raw_weeks.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(raw_index: u32, start_date: NaiveDate) -> Span {
        Span {
            raw_index,
            start_date,
        }
    }

    fn september_map() -> WeekMap {
        WeekMap::from_spans(&[span(1, date(2025, 9, 1)), span(2, date(2025, 9, 8))])
    }

    #[test]
    fn test_resolve_second_week() {
        let map = september_map();
        assert_eq!(map.resolve("NY", 3).unwrap(), date(2025, 9, 11));
    }

    #[test]
    fn test_resolve_first_day_of_week() {
        let map = september_map();
        assert_eq!(map.resolve("YNNNN", 0).unwrap(), date(2025, 9, 1));
    }

    #[test]
    fn test_resolve_ignores_unrelated_spans() {
        let sparse = WeekMap::from_spans(&[span(2, date(2025, 9, 8))]);
        let crowded = WeekMap::from_spans(&[
            span(7, date(2025, 10, 13)),
            span(2, date(2025, 9, 8)),
            span(30, date(2026, 3, 30)),
        ]);

        assert_eq!(
            sparse.resolve("NYNN", 4).unwrap(),
            crowded.resolve("NYNN", 4).unwrap()
        );
    }

    #[test]
    fn test_first_marker_wins() {
        let map = september_map();
        assert_eq!(map.resolve("YY", 1).unwrap(), date(2025, 9, 2));
    }

    #[test]
    fn test_missing_marker() {
        let map = september_map();
        let err = map.resolve("NNNN", 0).unwrap_err();
        assert!(
            matches!(err, CelcatError::MalformedWeekEncoding(ref s) if s == "NNNN"),
            "Unexpected error: {err}"
        );
    }

    #[test]
    fn test_undeclared_week() {
        let map = september_map();
        let err = map.resolve("NNNY", 0).unwrap_err();
        assert!(matches!(err, CelcatError::KeyResolution(4)), "Unexpected error: {err}");
    }

    #[test]
    fn test_duplicate_index_last_wins() {
        let map = WeekMap::from_spans(&[span(1, date(2025, 9, 1)), span(1, date(2026, 1, 5))]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.week_start(1), Some(date(2026, 1, 5)));
    }

    #[test]
    fn test_map_never_larger_than_spans() {
        let spans = [
            span(1, date(2025, 9, 1)),
            span(2, date(2025, 9, 8)),
            span(2, date(2025, 9, 8)),
        ];
        let map = WeekMap::from_spans(&spans);
        assert!(map.len() <= spans.len());
    }

    #[test]
    fn test_week_index() {
        assert_eq!(week_index("Y").unwrap(), 1);
        assert_eq!(week_index("NNNNNNNNNNY").unwrap(), 11);
        assert!(week_index("").is_err());
    }
}
