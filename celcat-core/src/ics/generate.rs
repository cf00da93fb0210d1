//! ICS file generation.

use chrono::{DateTime, NaiveDateTime, Utc};
use icalendar::{Calendar, Component, EventLike, Property};

use crate::event::OutputEvent;
use crate::ics::timezone::TimezoneDef;

pub const DEFAULT_PRODID: &str = "-//celcat-ics//CELCAT timetable//FR";

/// Calendar-level properties.
#[derive(Debug, Clone)]
pub struct CalendarMetadata<'a> {
    /// Display name (X-WR-CALNAME)
    pub name: &'a str,
    pub prodid: &'a str,
    pub timezone: &'a TimezoneDef,
}

/// Generate a full .ics calendar for the given events
pub fn generate_calendar(metadata: &CalendarMetadata, events: &[OutputEvent]) -> String {
    let mut cal = Calendar::new();
    cal.name(metadata.name);
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("X-WR-TIMEZONE", metadata.timezone.tzid));

    for event in events {
        cal.push(to_ics_event(event, metadata.timezone.tzid));
    }
    let cal = cal.done();

    finish_calendar(&cal.to_string(), metadata)
}

fn to_ics_event(event: &OutputEvent, tzid: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);
    ics_event.location(&event.location);
    ics_event.description(&event.description);

    add_local_datetime(&mut ics_event, "DTSTART", &event.start, tzid);
    add_local_datetime(&mut ics_event, "DTEND", &event.end, tzid);

    ics_event.add_property("DTSTAMP", utc_stamp(&event.last_modified));
    ics_event.add_property("CREATED", utc_stamp(&event.created));
    ics_event.add_property("LAST-MODIFIED", utc_stamp(&event.last_modified));
    ics_event.add_property("STATUS", event.status);

    ics_event.done()
}

/// Datetime with TZID parameter
fn add_local_datetime(ics_event: &mut icalendar::Event, name: &str, dt: &NaiveDateTime, tzid: &str) {
    let mut prop = Property::new(name, dt.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", tzid);
    ics_event.append_property(prop);
}

fn utc_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Post-process the icalendar crate's output
/// - Replace PRODID with ours
/// - Insert the VTIMEZONE block before the first event (or before END:VCALENDAR)
fn finish_calendar(ics: &str, metadata: &CalendarMetadata) -> String {
    let vtimezone = metadata.timezone.to_vtimezone();
    let mut result = String::with_capacity(ics.len() + vtimezone.len());
    let mut timezone_written = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(&format!("PRODID:{}\r\n", metadata.prodid));
            continue;
        }

        if !timezone_written && (line == "BEGIN:VEVENT" || line == "END:VCALENDAR") {
            result.push_str(&vtimezone);
            timezone_written = true;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
