//! Core of the CELCAT to ICS converter.
//!
//! - `timetable` reads the CELCAT XML export
//! - `week` resolves week-index encodings into dates
//! - `filter` selects events by group and course
//! - `mapper` turns timetable events into calendar events
//! - `ics` serializes calendar events with a fixed timezone block

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod ics;
pub mod mapper;
pub mod timetable;
pub mod week;

pub use error::{CelcatError, CelcatResult};
pub use event::OutputEvent;
pub use filter::{FilterClause, FilterExpr};
pub use mapper::{MappedDocument, Mapper};
pub use timetable::{RawEvent, Span, Timetable};
pub use week::WeekMap;
