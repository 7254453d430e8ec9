use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::config::env::{EnvStore, ProcessEnv};
use crate::config::loader::load_env_file;
use crate::config::path::resolve_path;
use crate::error::{Error, Result};

const TRUE_VALUES: [&str; 4] = ["true", "1", "yes", "on"];

/// Typed accessors over environment state. Values are never cached; every
/// call reads the backing store again.
#[derive(Clone)]
pub struct ConfigStore {
    env_file: Option<PathBuf>,
    env: Arc<dyn EnvStore>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("env_file", &self.env_file)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    pub fn new(env_file: Option<&Path>) -> Result<Self> {
        Self::with_env(Arc::new(ProcessEnv), env_file)
    }

    /// Seeds `env` from `env_file` when that file exists. A missing file is
    /// not an error.
    pub fn with_env(env: Arc<dyn EnvStore>, env_file: Option<&Path>) -> Result<Self> {
        if let Some(path) = env_file {
            if path.exists() {
                load_env_file(path, env.as_ref())?;
            } else {
                tracing::debug!(path = %path.display(), "env file not found; skipping");
            }
        }

        Ok(Self {
            env_file: env_file.map(Path::to_path_buf),
            env,
        })
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    pub fn get(&self, key: &str, default: Option<&str>, required: bool) -> Result<Option<String>> {
        let value = self.env.var(key).or_else(|| default.map(str::to_owned));
        if required && value.is_none() {
            return Err(missing(key));
        }
        Ok(value)
    }

    pub fn require(&self, key: &str) -> Result<String> {
        self.env.var(key).ok_or_else(|| missing(key))
    }

    pub fn get_int(&self, key: &str, default: Option<i64>, required: bool) -> Result<Option<i64>> {
        let Some(raw) = self.env.var(key) else {
            if required && default.is_none() {
                return Err(missing(key));
            }
            return Ok(default);
        };

        raw.trim().parse::<i64>().map(Some).map_err(|err| {
            Error::Config(format!("invalid integer value for {key}: '{raw}' ({err})"))
        })
    }

    /// `true`, `1`, `yes` and `on` (any case) are true; any other value is
    /// false. Only absence falls back to `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.env.var(key) {
            Some(raw) => TRUE_VALUES
                .iter()
                .any(|candidate| raw.eq_ignore_ascii_case(candidate)),
            None => default,
        }
    }

    pub fn get_path(
        &self,
        key: &str,
        default: Option<PathBuf>,
        required: bool,
    ) -> Result<Option<PathBuf>> {
        let Some(raw) = self.env.var(key) else {
            if required && default.is_none() {
                return Err(missing(key));
            }
            return Ok(default);
        };

        resolve_path(&raw).map(Some)
    }
}

fn missing(key: &str) -> Error {
    Error::Config(format!("required configuration missing: {key}"))
}

static GLOBAL_CONFIG: OnceLock<ConfigStore> = OnceLock::new();

/// Returns the process-wide store, creating it on first use. `env_file` is
/// only consulted by the call that creates it.
pub fn get_config(env_file: Option<&Path>) -> Result<&'static ConfigStore> {
    if let Some(config) = GLOBAL_CONFIG.get() {
        return Ok(config);
    }

    let config = ConfigStore::new(env_file)?;
    Ok(GLOBAL_CONFIG.get_or_init(|| config))
}
