//! Reading CELCAT timetable exports.
//!
//! A CELCAT export looks like:
//!
//! ```xml
//! <timetable>
//!   <option><subheading>L3 Informatique</subheading></option>
//!   <span rawix="1" date="01/09/2025">...</span>
//!   <event id="12345">
//!     <day>3</day>
//!     <starttime>08:00</starttime>
//!     <endtime>09:30</endtime>
//!     <category>TD</category>
//!     <rawweeks>NYNNNNNNNN</rawweeks>
//!     <resources>
//!       <module><item>Logique</item></module>
//!       <group><item>TPA31</item></group>
//!       <room><item>U3-205</item></room>
//!     </resources>
//!   </event>
//! </timetable>
//! ```
//!
//! Event fields that only matter once an event is kept (day, times, week
//! encoding) are stored as raw text and interpreted by the mapper.

use std::io::Read;

use chrono::NaiveDate;
use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{CelcatError, CelcatResult};

/// Date format used by span `date` attributes.
const SPAN_DATE_FORMAT: &str = "%d/%m/%Y";

/// A header record mapping a week index to the date its week starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub raw_index: u32,
    pub start_date: NaiveDate,
}

/// A timetable event as found in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub id: String,
    pub category: Option<String>,
    pub groups: Vec<String>,
    pub course: Option<String>,
    pub rooms: Vec<String>,
    /// Day offset within the week, as written in `<day>`
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub raw_weeks: Option<String>,
    pub notes: Option<String>,
}

/// A parsed CELCAT document.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    pub spans: Vec<Span>,
    pub events: Vec<RawEvent>,
    pub subheading: Option<String>,
}

impl Timetable {
    /// Read a whole stream and parse it.
    pub fn from_reader(mut reader: impl Read) -> CelcatResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> CelcatResult<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;
        let root = doc.root_element();

        if root.tag_name().name() != "timetable" {
            return Err(CelcatError::MissingField("timetable"));
        }

        let spans = children(root, "span")
            .map(parse_span)
            .collect::<CelcatResult<Vec<_>>>()?;

        let events: Vec<RawEvent> = children(root, "event").map(parse_event).collect();

        let subheading = children(root, "option")
            .flat_map(|option| children(option, "subheading"))
            .find_map(text_of);

        tracing::debug!(
            spans = spans.len(),
            events = events.len(),
            "parsed timetable"
        );

        Ok(Timetable {
            spans,
            events,
            subheading,
        })
    }
}

fn parse_span(node: Node) -> CelcatResult<Span> {
    let raw_index = node
        .attribute("rawix")
        .ok_or(CelcatError::MissingField("rawix"))?;
    let raw_index = raw_index
        .trim()
        .parse::<u32>()
        .map_err(|_| CelcatError::InvalidField {
            field: "rawix",
            value: raw_index.to_string(),
        })?;

    let date = node
        .attribute("date")
        .ok_or(CelcatError::MissingField("date"))?;
    let start_date = NaiveDate::parse_from_str(date.trim(), SPAN_DATE_FORMAT).map_err(|_| {
        CelcatError::InvalidField {
            field: "date",
            value: date.to_string(),
        }
    })?;

    Ok(Span {
        raw_index,
        start_date,
    })
}

fn parse_event(node: Node) -> RawEvent {
    let id = match node.attribute("id") {
        Some(id) => id.to_string(),
        None => {
            tracing::warn!("timetable event without id attribute");
            String::new()
        }
    };

    RawEvent {
        id,
        category: child_text(node, "category"),
        groups: resource_items(node, "group"),
        course: resource_items(node, "module").into_iter().next(),
        rooms: resource_items(node, "room"),
        day: child_text(node, "day"),
        start_time: child_text(node, "starttime"),
        end_time: child_text(node, "endtime"),
        raw_weeks: child_text(node, "rawweeks"),
        notes: child_text(node, "notes"),
    }
}

/// Element children of `node` named `name`
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text content, `None` when empty
fn text_of(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn child_text(node: Node, name: &str) -> Option<String> {
    children(node, name).find_map(text_of)
}

/// Texts of `resources/<kind>/item`
fn resource_items(event: Node, kind: &str) -> Vec<String> {
    children(event, "resources")
        .flat_map(|resources| children(resources, kind))
        .flat_map(|group| children(group, "item"))
        .filter_map(text_of)
        .collect()
}
