//! Structured JSON logging with correlation ids.
//!
//! Records pass through `MergeContextVars -> AddLogLevel -> StackInfoRenderer
//! -> SetExcInfo -> TimeStamper -> AddCorrelationId` and are rendered as one
//! JSON object per line.

pub mod context;
pub mod layer;
pub mod level;
pub mod logger;
pub mod pipeline;
pub mod processors;
pub mod record;

use std::sync::{Arc, LazyLock, OnceLock, PoisonError, RwLock};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

pub use context::{bind_contextvars, clear_contextvars, contextvars, unbind_contextvars};
pub use layer::PipelineLayer;
pub use level::Level;
pub use logger::{get_logger, Logger};
pub use pipeline::LogPipeline;
pub use processors::{
    default_processors, AddCorrelationId, AddLogLevel, JsonRenderer, MergeContextVars,
    Processor, SetExcInfo, StackInfoRenderer, TimeStamper,
};
pub use record::LogRecord;

static ACTIVE_PIPELINE: LazyLock<RwLock<Arc<LogPipeline>>> =
    LazyLock::new(|| RwLock::new(Arc::new(LogPipeline::stdout(Level::Info))));

static TRACING_BRIDGE: OnceLock<bool> = OnceLock::new();

pub fn active_pipeline() -> Arc<LogPipeline> {
    ACTIVE_PIPELINE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

pub fn install_pipeline(pipeline: LogPipeline) {
    *ACTIVE_PIPELINE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Arc::new(pipeline);
}

/// Installs a stdout JSON pipeline at `log_level` process-wide. Safe to call
/// again; the latest call wins.
pub fn configure_logging(log_level: &str) -> Result<()> {
    let level: Level = log_level.parse()?;
    install_pipeline(LogPipeline::stdout(level));
    install_tracing_bridge();
    Ok(())
}

/// Sends `tracing` events through the active pipeline. Returns false when
/// another global subscriber was installed first; `Logger` output is
/// unaffected in that case.
pub fn install_tracing_bridge() -> bool {
    *TRACING_BRIDGE.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
        tracing_subscriber::registry()
            .with(filter)
            .with(PipelineLayer::active())
            .try_init()
            .is_ok()
    })
}


#[cfg(test)]
mod tests {
    use super::{active_pipeline, configure_logging, get_logger, Level};

    #[test]
    fn configure_logging_applies_latest_level() {
        configure_logging("DEBUG").expect("valid level");
        assert_eq!(active_pipeline().min_level(), Level::Debug);

        configure_logging("error").expect("valid level");
        assert_eq!(active_pipeline().min_level(), Level::Error);

        let logger = get_logger("test");
        logger.bind("user_id", "123").debug("filtered out");
    }

    #[test]
    fn configure_logging_rejects_unknown_level() {
        let error = configure_logging("LOUD").expect_err("unknown level");
        assert!(error.to_string().contains("unknown log level"));
    }
}
