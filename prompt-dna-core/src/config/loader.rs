use std::path::Path;

use crate::config::env::EnvStore;
use crate::error::{Error, Result};

/// Parses `key=value` lines. Blank lines, `#` comments and lines without `=`
/// are skipped; the first `=` splits and both sides are trimmed.
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        // the process environment cannot hold these
        .filter(|(key, value)| !key.is_empty() && !key.contains('\0') && !value.contains('\0'))
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}

pub fn load_env_file(path: &Path, env: &dyn EnvStore) -> Result<usize> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        Error::Config(format!("failed to read env file '{}': {err}", path.display()))
    })?;

    let entries = parse_env_file(&content);
    for (key, value) in &entries {
        env.set_var(key, value);
    }

    tracing::debug!(path = %path.display(), entries = entries.len(), "loaded env file");
    Ok(entries.len())
}
