//! ICS generation.
//!
//! Calendars are written according to RFC 5545, with a static `VTIMEZONE`
//! block for the single timezone all timetable times are expressed in.

mod generate;
mod timezone;

pub use generate::{CalendarMetadata, DEFAULT_PRODID, generate_calendar};
pub use timezone::{EUROPE_PARIS, Observance, TimezoneDef};
