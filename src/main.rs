mod input;
mod logging;
mod output;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use celcat_core::config::CelcatConfig;
use celcat_core::ics::{CalendarMetadata, DEFAULT_PRODID, EUROPE_PARIS};
use celcat_core::{CelcatError, FilterExpr, MappedDocument, Mapper, OutputEvent, Timetable};
use chrono::Utc;
use clap::{ArgAction, Parser};

use input::Input;
use output::Format;

/// Calendar name used when no document provides a subheading
const FALLBACK_CALENDAR_NAME: &str = "CELCAT";

#[derive(Parser)]
#[command(name = "celcat-ics", version)]
#[command(about = "Convert CELCAT timetable exports to .ics calendars")]
struct Cli {
    /// CELCAT .xml exports to convert ("-" reads stdin)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (stdout by default)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Filter expression, e.g. "TPA31,TPA32:Info,Logique+TPB:Anglais"
    #[arg(short, long, conflicts_with_all = ["groups", "courses"])]
    filter: Option<String>,

    /// Only keep events whose group contains one of these strings
    #[arg(short, long, value_delimiter = ',')]
    groups: Vec<String>,

    /// Only keep events whose course name contains one of these strings
    #[arg(short, long, value_delimiter = ',')]
    courses: Vec<String>,

    /// Calendar name (defaults to the document's subheading)
    #[arg(short, long)]
    name: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Ics)]
    format: Format,

    /// Skip documents that fail to convert instead of aborting
    #[arg(short, long)]
    keep_going: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CelcatConfig::load()?;

    let log_file = cli.log_file.clone().or_else(|| config.log_file_path());
    logging::init(cli.verbose, log_file.as_deref())?;

    let filter = resolve_filter(&cli, &config)?;
    let inputs = Input::parse_all(&cli.inputs)?;

    tracing::debug!(%filter, inputs = inputs.len(), "starting conversion");

    let mut mapper = Mapper::new(Utc::now());
    let (events, names) = convert_all(&mut mapper, &inputs, &filter, cli.keep_going)?;

    let name = cli
        .name
        .or(config.calendar_name)
        .unwrap_or_else(|| combine_names(&names));
    let prodid = config.prodid.as_deref().unwrap_or(DEFAULT_PRODID);

    let metadata = CalendarMetadata {
        name: &name,
        prodid,
        timezone: &EUROPE_PARIS,
    };

    let content = output::render(cli.format, &metadata, &events)?;
    output::write(&content, cli.output.as_deref())?;

    tracing::info!(events = events.len(), calendar = %name, "conversion finished");
    Ok(())
}

/// Convert every input in order, accumulating events and calendar names.
///
/// A failing document aborts the run, unless `keep_going` is set: then the
/// failure is logged and the events of the other documents are kept.
fn convert_all(
    mapper: &mut Mapper,
    inputs: &[Input],
    filter: &FilterExpr,
    keep_going: bool,
) -> Result<(Vec<OutputEvent>, Vec<String>)> {
    let mut events: Vec<OutputEvent> = Vec::new();
    let mut names: Vec<String> = Vec::new();

    for input in inputs {
        match convert(mapper, input, filter) {
            Ok(document) => {
                events.extend(document.events);
                names.extend(document.calendar_name);
            }
            Err(err) if keep_going => {
                let event_id = err.downcast_ref::<CelcatError>().and_then(CelcatError::event_id);
                tracing::error!(event = ?event_id, "{:#}", err);
                tracing::warn!(input = %input, "skipping document");
            }
            Err(err) => return Err(err),
        }
    }

    Ok((events, names))
}

fn convert(mapper: &mut Mapper, input: &Input, filter: &FilterExpr) -> Result<MappedDocument> {
    let reader = input.open()?;
    let timetable = Timetable::from_reader(reader)
        .with_context(|| format!("Failed to read timetable from {}", input))?;

    mapper
        .map_document(&timetable, filter)
        .with_context(|| format!("Failed to convert {}", input))
}

/// Command-line filter, then legacy -g/-c flags, then the configured default
fn resolve_filter(cli: &Cli, config: &CelcatConfig) -> Result<FilterExpr> {
    if let Some(expr) = &cli.filter {
        return expr
            .parse()
            .with_context(|| format!("Invalid --filter '{}'", expr));
    }

    if !cli.groups.is_empty() || !cli.courses.is_empty() {
        return Ok(FilterExpr::from_legacy(&cli.groups, &cli.courses));
    }

    match &config.filter {
        Some(expr) => expr
            .parse()
            .with_context(|| format!("Invalid filter '{}' in configuration", expr)),
        None => Ok(FilterExpr::default()),
    }
}

/// Join the distinct document names, in order
fn combine_names(names: &[String]) -> String {
    let mut distinct: Vec<&str> = Vec::new();
    for name in names {
        if !distinct.contains(&name.as_str()) {
            distinct.push(name);
        }
    }

    if distinct.is_empty() {
        FALLBACK_CALENDAR_NAME.to_string()
    } else {
        distinct.join(" / ")
    }
}
