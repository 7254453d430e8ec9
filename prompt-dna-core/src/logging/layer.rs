use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::logging::active_pipeline;
use crate::logging::level::Level;
use crate::logging::pipeline::LogPipeline;
use crate::logging::record::{LogRecord, EVENT_KEY};

/// Routes `tracing` events through a [`LogPipeline`]. Fields of enclosing
/// spans are merged into each event, innermost last.
#[derive(Clone, Default)]
pub struct PipelineLayer {
    pipeline: Option<Arc<LogPipeline>>,
}

impl PipelineLayer {
    /// Follows whichever pipeline `configure_logging` installed last.
    pub fn active() -> Self {
        Self::default()
    }

    pub fn new(pipeline: Arc<LogPipeline>) -> Self {
        Self {
            pipeline: Some(pipeline),
        }
    }

    fn pipeline(&self) -> Arc<LogPipeline> {
        match &self.pipeline {
            Some(pipeline) => pipeline.clone(),
            None => active_pipeline(),
        }
    }
}

struct SpanFields(Map<String, Value>);

impl<S> Layer<S> for PipelineLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // the minimum level can change at runtime, so never cache a verdict
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        metadata.is_span() || self.pipeline().enabled(Level::from_tracing(*metadata.level()))
    }

    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = JsonVisitor::default();
        attrs.record(&mut visitor);
        span.extensions_mut().insert(SpanFields(visitor.fields));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut visitor = JsonVisitor::default();
        values.record(&mut visitor);
        let mut extensions = span.extensions_mut();
        match extensions.get_mut::<SpanFields>() {
            Some(SpanFields(fields)) => fields.extend(visitor.fields),
            None => extensions.insert(SpanFields(visitor.fields)),
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from_tracing(*metadata.level());
        let pipeline = self.pipeline();
        if !pipeline.enabled(level) {
            return;
        }

        let mut fields = Map::new();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(SpanFields(span_fields)) = span.extensions().get::<SpanFields>() {
                    fields.extend(span_fields.clone());
                }
            }
        }

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);
        let message = match visitor.fields.remove(EVENT_KEY) {
            Some(Value::String(message)) => message,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        fields.extend(visitor.fields);

        pipeline.emit(LogRecord::new(metadata.target(), level, &message).with_fields(fields));
    }
}

#[derive(Default)]
struct JsonVisitor {
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        let key = match field.name() {
            "message" => EVENT_KEY,
            name => name,
        };
        self.fields.insert(key.to_owned(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::from(format!("{value:?}")));
    }
}
