use std::backtrace::Backtrace;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::logging::context::contextvars;
use crate::logging::record::{LogRecord, CORRELATION_ID_KEY};

/// One enrichment step applied to every record, in pipeline order.
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut LogRecord);
}

/// Ambient thread context; fields already on the record win.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeContextVars;

impl Processor for MergeContextVars {
    fn process(&self, record: &mut LogRecord) {
        for (key, value) in contextvars() {
            record.fields.entry(key).or_insert(value);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddLogLevel;

impl Processor for AddLogLevel {
    fn process(&self, record: &mut LogRecord) {
        record
            .fields
            .insert("level".to_owned(), Value::from(record.level.as_str()));
    }
}

/// Replaces `stack_info: true` with the captured backtrace under `stack`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackInfoRenderer;

impl Processor for StackInfoRenderer {
    fn process(&self, record: &mut LogRecord) {
        if let Some(requested) = record.fields.remove("stack_info") {
            if requested.as_bool() == Some(true) {
                let stack = Backtrace::force_capture().to_string();
                record.fields.insert("stack".to_owned(), Value::String(stack));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SetExcInfo;

impl Processor for SetExcInfo {
    fn process(&self, record: &mut LogRecord) {
        if let Some(exception) = record.exception.take() {
            record
                .fields
                .entry("exception".to_owned())
                .or_insert(Value::String(exception));
        }
    }
}

/// ISO-8601 UTC timestamp with microseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeStamper;

impl Processor for TimeStamper {
    fn process(&self, record: &mut LogRecord) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        record
            .fields
            .insert("timestamp".to_owned(), Value::String(timestamp));
    }
}

/// Adds a fresh UUID v4 unless the record already carries a correlation id.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddCorrelationId;

impl Processor for AddCorrelationId {
    fn process(&self, record: &mut LogRecord) {
        record
            .fields
            .entry(CORRELATION_ID_KEY.to_owned())
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn render(&self, record: &LogRecord) -> serde_json::Result<String> {
        serde_json::to_string(&record.fields)
    }
}

pub fn default_processors() -> Vec<Box<dyn Processor>> {
    vec![
        Box::new(MergeContextVars),
        Box::new(AddLogLevel),
        Box::new(StackInfoRenderer),
        Box::new(SetExcInfo),
        Box::new(TimeStamper),
        Box::new(AddCorrelationId),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use super::{
        AddCorrelationId, AddLogLevel, JsonRenderer, MergeContextVars, Processor, SetExcInfo,
        StackInfoRenderer, TimeStamper,
    };
    use crate::logging::context::{bind_contextvars, clear_contextvars};
    use crate::logging::level::Level;
    use crate::logging::record::LogRecord;

    fn record() -> LogRecord {
        LogRecord::new("test", Level::Info, "test_event")
    }

    #[test]
    fn adds_correlation_id_when_missing() {
        let mut record = record();
        AddCorrelationId.process(&mut record);

        let id = record
            .get("correlation_id")
            .and_then(Value::as_str)
            .expect("correlation id should be a string");
        let parsed = Uuid::parse_str(id).expect("uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn preserves_existing_correlation_id() {
        let mut record = record();
        record
            .fields
            .insert("correlation_id".to_owned(), json!("existing-correlation-id"));
        AddCorrelationId.process(&mut record);
        AddCorrelationId.process(&mut record);
        assert_eq!(
            record.get("correlation_id"),
            Some(&json!("existing-correlation-id"))
        );
    }

    #[test]
    fn correlation_id_is_stable_across_reprocessing() {
        let mut record = record();
        AddCorrelationId.process(&mut record);
        let first = record.get("correlation_id").cloned();
        AddCorrelationId.process(&mut record);
        assert_eq!(record.get("correlation_id").cloned(), first);
    }

    #[test]
    fn adds_lowercase_level() {
        let mut record = LogRecord::new("test", Level::Warning, "careful");
        AddLogLevel.process(&mut record);
        assert_eq!(record.get("level"), Some(&json!("warning")));
    }

    #[test]
    fn stamps_iso_8601_utc() {
        let mut record = record();
        TimeStamper.process(&mut record);
        let timestamp = record
            .get("timestamp")
            .and_then(Value::as_str)
            .expect("timestamp");
        assert!(timestamp.ends_with('Z'));
        DateTime::parse_from_rfc3339(timestamp).expect("rfc3339 timestamp");
    }

    #[test]
    fn merges_context_without_overriding_record_fields() {
        clear_contextvars();
        bind_contextvars([("request_id", json!("ambient")), ("user_id", json!("ambient"))]);

        let mut record = record();
        record.fields.insert("user_id".to_owned(), json!("explicit"));
        MergeContextVars.process(&mut record);
        clear_contextvars();

        assert_eq!(record.get("request_id"), Some(&json!("ambient")));
        assert_eq!(record.get("user_id"), Some(&json!("explicit")));
    }

    #[test]
    fn renders_stack_only_when_requested() {
        let mut record = record();
        record.fields.insert("stack_info".to_owned(), json!(false));
        StackInfoRenderer.process(&mut record);
        assert!(record.get("stack_info").is_none());
        assert!(record.get("stack").is_none());

        record.fields.insert("stack_info".to_owned(), json!(true));
        StackInfoRenderer.process(&mut record);
        assert!(record.get("stack").and_then(Value::as_str).is_some());
    }

    #[test]
    fn moves_exception_into_fields() {
        let mut record = record();
        record.exception = Some("boom\ncaused by: io".to_owned());
        SetExcInfo.process(&mut record);
        assert!(record.exception.is_none());
        assert_eq!(record.get("exception"), Some(&json!("boom\ncaused by: io")));
    }

    #[test]
    fn renders_single_line_json() {
        let mut record = record();
        record.fields.insert("note".to_owned(), json!("line one\nline two"));
        let line = JsonRenderer.render(&record).expect("render");
        assert!(!line.contains('\n'));

        let parsed: Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(parsed["event"], json!("test_event"));
        assert_eq!(parsed["logger"], json!("test"));
    }
}
