use serde_json::{Map, Value};

use crate::logging::level::Level;

pub const EVENT_KEY: &str = "event";
pub const LOGGER_KEY: &str = "logger";
pub const CORRELATION_ID_KEY: &str = "correlation_id";

/// A log event in flight through the processor pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    pub fields: Map<String, Value>,
    /// Rendered error chain, set by `Logger::exception`.
    pub exception: Option<String>,
}

impl LogRecord {
    pub fn new(logger: &str, level: Level, event: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(LOGGER_KEY.to_owned(), Value::String(logger.to_owned()));
        fields.insert(EVENT_KEY.to_owned(), Value::String(event.to_owned()));
        Self {
            level,
            fields,
            exception: None,
        }
    }

    /// Adds caller fields; `event` and `logger` stay as constructed.
    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        for (key, value) in fields {
            if key != EVENT_KEY && key != LOGGER_KEY {
                self.fields.insert(key, value);
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

pub fn render_error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str("\ncaused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
