//! Error types for CELCAT conversion.

use thiserror::Error;

/// Errors that can occur while reading, filtering or mapping a timetable.
#[derive(Error, Debug)]
pub enum CelcatError {
    #[error("Malformed week encoding '{0}': no 'Y' marker")]
    MalformedWeekEncoding(String),

    #[error("Week index {0} is not declared by any span")]
    KeyResolution(u32),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    TimeParse(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event '{id}': {source}")]
    Event {
        id: String,
        #[source]
        source: Box<CelcatError>,
    },
}

impl CelcatError {
    /// Attach the id of the timetable event being mapped.
    pub fn in_event(self, id: &str) -> Self {
        CelcatError::Event {
            id: id.to_string(),
            source: Box::new(self),
        }
    }

    /// Id of the offending event, if the error was raised while mapping one.
    pub fn event_id(&self) -> Option<&str> {
        match self {
            CelcatError::Event { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Result type alias for CELCAT operations.
pub type CelcatResult<T> = Result<T, CelcatError>;
