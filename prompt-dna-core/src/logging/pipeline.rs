use std::io::Write;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::logging::level::Level;
use crate::logging::processors::{default_processors, JsonRenderer, Processor};
use crate::logging::record::LogRecord;

/// Minimum level, ordered processors and a JSON renderer feeding one sink.
pub struct LogPipeline {
    min_level: Level,
    processors: Vec<Box<dyn Processor>>,
    renderer: JsonRenderer,
    writer: BoxMakeWriter,
}

impl LogPipeline {
    pub fn new<W>(min_level: Level, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self::with_processors(min_level, default_processors(), writer)
    }

    pub fn stdout(min_level: Level) -> Self {
        Self::new(min_level, std::io::stdout)
    }

    pub fn with_processors<W>(
        min_level: Level,
        processors: Vec<Box<dyn Processor>>,
        writer: W,
    ) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            min_level,
            processors,
            renderer: JsonRenderer,
            writer: BoxMakeWriter::new(writer),
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// Runs the processors; `None` when the record is below the minimum level.
    pub fn process(&self, mut record: LogRecord) -> Option<LogRecord> {
        if !self.enabled(record.level) {
            return None;
        }
        for processor in &self.processors {
            processor.process(&mut record);
        }
        Some(record)
    }

    pub fn render(&self, record: LogRecord) -> Option<String> {
        let record = self.process(record)?;
        match self.renderer.render(&record) {
            Ok(line) => Some(line),
            Err(err) => {
                eprintln!("failed to render log record: {err}");
                None
            }
        }
    }

    pub fn emit(&self, record: LogRecord) {
        let Some(line) = self.render(record) else {
            return;
        };
        let mut writer = self.writer.make_writer();
        if let Err(err) = writeln!(writer, "{line}") {
            eprintln!("failed to write log record: {err}");
        }
    }
}
