//! Mapping timetable events to calendar events.

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::{CelcatError, CelcatResult};
use crate::event::{OutputEvent, STATUS_CONFIRMED};
use crate::filter::FilterExpr;
use crate::timetable::{RawEvent, Timetable};
use crate::week::WeekMap;

const TIME_FORMAT: &str = "%H:%M";
const LOCATION_SEPARATOR: &str = ", ";

/// Events kept from one document, with the document's calendar name.
#[derive(Debug, Clone, Default)]
pub struct MappedDocument {
    pub events: Vec<OutputEvent>,
    pub calendar_name: Option<String>,
}

/// Maps timetable documents for one run.
///
/// The uid sequence carries over from one document to the next so that uids
/// stay unique within the run.
#[derive(Debug, Clone)]
pub struct Mapper {
    generated_at: DateTime<Utc>,
    sequence: usize,
}

impl Mapper {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Mapper {
            generated_at,
            sequence: 0,
        }
    }

    /// Number of events emitted so far in this run
    pub fn emitted(&self) -> usize {
        self.sequence
    }

    /// Filter and map every event of a document.
    ///
    /// The first event that passes the filter but cannot be mapped aborts the
    /// document; the error carries that event's id.
    pub fn map_document(
        &mut self,
        timetable: &Timetable,
        filter: &FilterExpr,
    ) -> CelcatResult<MappedDocument> {
        let weeks = WeekMap::from_spans(&timetable.spans);
        let mut events = Vec::new();

        for raw in &timetable.events {
            if !filter.matches(&raw.groups, raw.course.as_deref()) {
                tracing::trace!(id = %raw.id, course = ?raw.course, "event filtered out");
                continue;
            }

            let event = self
                .map_event(raw, &weeks)
                .map_err(|e| e.in_event(&raw.id))?;
            self.sequence += 1;
            events.push(event);
        }

        tracing::info!(
            kept = events.len(),
            total = timetable.events.len(),
            weeks = weeks.len(),
            "mapped timetable"
        );

        Ok(MappedDocument {
            events,
            calendar_name: timetable.subheading.clone(),
        })
    }

    fn map_event(&self, raw: &RawEvent, weeks: &WeekMap) -> CelcatResult<OutputEvent> {
        let summary = raw.course.clone().ok_or(CelcatError::MissingField("module"))?;

        let raw_weeks = raw
            .raw_weeks
            .as_deref()
            .ok_or(CelcatError::MissingField("rawweeks"))?;
        let date = weeks.resolve(raw_weeks, parse_day(raw.day.as_deref())?)?;

        let start = date.and_time(parse_time(raw.start_time.as_deref(), "starttime")?);
        let end = date.and_time(parse_time(raw.end_time.as_deref(), "endtime")?);

        Ok(OutputEvent {
            uid: format!("{}-{}", raw.id, self.sequence),
            summary,
            location: raw.rooms.join(LOCATION_SEPARATOR),
            description: self.describe(raw),
            start,
            end,
            created: self.generated_at,
            last_modified: self.generated_at,
            status: STATUS_CONFIRMED,
        })
    }

    fn describe(&self, raw: &RawEvent) -> String {
        let mut description = String::new();

        if let Some(notes) = &raw.notes {
            description.push_str("Remarques:\n");
            description.push_str(notes);
            description.push('\n');
        }

        description.push_str("Groupes:\n");
        for group in &raw.groups {
            description.push_str(group);
            description.push('\n');
        }

        description.push_str(&format!(
            "Généré par celcat-ics le {}",
            self.generated_at.format("%d/%m/%Y à %H:%M UTC")
        ));

        description
    }
}

fn parse_day(day: Option<&str>) -> CelcatResult<u32> {
    let day = day.ok_or(CelcatError::MissingField("day"))?;
    day.parse().map_err(|_| CelcatError::InvalidField {
        field: "day",
        value: day.to_string(),
    })
}

fn parse_time(time: Option<&str>, field: &'static str) -> CelcatResult<NaiveTime> {
    let time = time.ok_or(CelcatError::MissingField(field))?;
    NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| CelcatError::TimeParse(time.to_string()))
}
