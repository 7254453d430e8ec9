use std::sync::Arc;

use serde_json::{Map, Value};

use crate::logging::active_pipeline;
use crate::logging::level::Level;
use crate::logging::pipeline::LogPipeline;
use crate::logging::record::{render_error_chain, LogRecord};

/// A named logger with bound context. Unless built with an explicit
/// pipeline, it resolves the active one on every call, so a later
/// `configure_logging` also applies to loggers created earlier.
#[derive(Clone)]
pub struct Logger {
    name: String,
    context: Map<String, Value>,
    pipeline: Option<Arc<LogPipeline>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

pub fn get_logger(name: &str) -> Logger {
    Logger {
        name: name.to_owned(),
        context: Map::new(),
        pipeline: None,
    }
}

impl Logger {
    pub fn with_pipeline(name: &str, pipeline: Arc<LogPipeline>) -> Self {
        Self {
            pipeline: Some(pipeline),
            ..get_logger(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    pub fn bind(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut bound = self.clone();
        bound.context.insert(key.into(), value.into());
        bound
    }

    pub fn debug(&self, event: &str) {
        self.log(Level::Debug, event);
    }

    pub fn info(&self, event: &str) {
        self.log(Level::Info, event);
    }

    pub fn warning(&self, event: &str) {
        self.log(Level::Warning, event);
    }

    pub fn error(&self, event: &str) {
        self.log(Level::Error, event);
    }

    pub fn critical(&self, event: &str) {
        self.log(Level::Critical, event);
    }

    /// Logs at error level with `error` and its sources under `exception`.
    pub fn exception(&self, event: &str, error: &(dyn std::error::Error + 'static)) {
        let pipeline = self.pipeline();
        if !pipeline.enabled(Level::Error) {
            return;
        }
        let mut record = self.record(Level::Error, event, Map::new());
        record.exception = Some(render_error_chain(error));
        pipeline.emit(record);
    }

    pub fn log(&self, level: Level, event: &str) {
        self.log_with(level, event, Map::new());
    }

    pub fn log_with(&self, level: Level, event: &str, fields: Map<String, Value>) {
        let pipeline = self.pipeline();
        if !pipeline.enabled(level) {
            return;
        }
        pipeline.emit(self.record(level, event, fields));
    }

    fn record(&self, level: Level, event: &str, fields: Map<String, Value>) -> LogRecord {
        let mut merged = self.context.clone();
        merged.extend(fields);
        LogRecord::new(&self.name, level, event).with_fields(merged)
    }

    fn pipeline(&self) -> Arc<LogPipeline> {
        match &self.pipeline {
            Some(pipeline) => pipeline.clone(),
            None => active_pipeline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Map};

    use super::{get_logger, Logger};
    use crate::error::Error;
    use crate::logging::level::Level;
    use crate::logging::pipeline::LogPipeline;
    use crate::logging::testing::CapturedLines;

    fn capturing_logger(name: &str, min_level: Level) -> (Logger, CapturedLines) {
        let capture = CapturedLines::default();
        let pipeline = Arc::new(LogPipeline::new(min_level, capture.clone()));
        (Logger::with_pipeline(name, pipeline), capture)
    }

    #[test]
    fn get_logger_keeps_name() {
        let logger = get_logger("test");
        assert_eq!(logger.name(), "test");
        assert!(logger.context().is_empty());
    }

    #[test]
    fn bound_context_appears_in_every_record() {
        let (logger, capture) = capturing_logger("svc", Level::Info);
        let bound = logger.bind("user_id", "123");
        bound.info("first");
        bound.warning("second");

        let lines = capture.json_lines();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["user_id"], json!("123"));
            assert_eq!(line["logger"], json!("svc"));
        }
        assert_eq!(lines[1]["level"], json!("warning"));
        assert!(logger.context().is_empty(), "bind must not mutate the parent");
    }

    #[test]
    fn caller_correlation_id_is_preserved() {
        let (logger, capture) = capturing_logger("svc", Level::Info);
        logger.bind("correlation_id", "req-42").info("handled");
        assert_eq!(capture.json_lines()[0]["correlation_id"], json!("req-42"));
    }

    #[test]
    fn each_unbound_record_gets_its_own_correlation_id() {
        let (logger, capture) = capturing_logger("svc", Level::Info);
        logger.info("one");
        logger.info("two");
        let lines = capture.json_lines();
        assert_ne!(lines[0]["correlation_id"], lines[1]["correlation_id"]);
    }

    #[test]
    fn per_call_fields_override_bound_context() {
        let (logger, capture) = capturing_logger("svc", Level::Debug);
        let mut fields = Map::new();
        fields.insert("attempt".to_owned(), json!(2));
        fields.insert("event".to_owned(), json!("hijacked"));
        logger
            .bind("attempt", 1)
            .log_with(Level::Debug, "retrying", fields);

        let line = &capture.json_lines()[0];
        assert_eq!(line["attempt"], json!(2));
        assert_eq!(line["event"], json!("retrying"));
    }

    #[test]
    fn filters_below_minimum_level() {
        let (logger, capture) = capturing_logger("svc", Level::Error);
        logger.debug("hidden");
        logger.info("hidden");
        logger.critical("shown");
        let lines = capture.json_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], json!("critical"));
    }

    #[test]
    fn exception_records_error_chain() {
        let (logger, capture) = capturing_logger("svc", Level::Info);
        let error = Error::Validation("bad key".to_owned());
        logger.exception("lookup failed", &error);

        let line = &capture.json_lines()[0];
        assert_eq!(line["level"], json!("error"));
        assert_eq!(line["exception"], json!("validation error: bad key"));
    }
}
