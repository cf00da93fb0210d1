//! Output formats and destinations.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use celcat_core::OutputEvent;
use celcat_core::ics::{CalendarMetadata, generate_calendar};
use clap::ValueEnum;

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// iCalendar (.ics)
    Ics,
    /// The mapped events as JSON
    Json,
    /// A day-by-day listing for the terminal
    Agenda,
}

pub fn render(format: Format, metadata: &CalendarMetadata, events: &[OutputEvent]) -> Result<String> {
    match format {
        Format::Ics => Ok(generate_calendar(metadata, events)),
        Format::Json => {
            let value = serde_json::json!({
                "name": metadata.name,
                "timezone": metadata.timezone.tzid,
                "events": events,
            });
            let mut json = serde_json::to_string_pretty(&value).context("Failed to serialize events")?;
            json.push('\n');
            Ok(json)
        }
        Format::Agenda => Ok(render::agenda(metadata.name, events)),
    }
}

/// Write to the given file, or to stdout
pub fn write(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}
