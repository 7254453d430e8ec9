pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{get_config, ConfigStore};
pub use error::{Error, Result};
pub use logging::{configure_logging, get_logger, Logger};
