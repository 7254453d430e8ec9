use std::path::{Component, PathBuf};

use crate::error::{Error, Result};

pub fn expand_home(raw: &str) -> PathBuf {
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/")
    };

    if let Some(rest) = rest {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Expands `~` and anchors relative paths at the current directory, then
/// walks the components: each step inside the existing part of the tree is
/// canonicalized so symlinks resolve before any later `..` applies. From the
/// first missing component on, the rest is joined lexically.
pub fn resolve_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_home(raw);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let work_dir = std::env::current_dir()
            .map_err(|err| Error::Config(format!("failed to read current directory: {err}")))?;
        work_dir.join(expanded)
    };

    let mut resolved = PathBuf::new();
    let mut missing = false;
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            // `resolved` holds no symlinks here, so popping is exact
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                let candidate = resolved.join(name);
                if missing {
                    resolved = candidate;
                    continue;
                }
                match std::fs::canonicalize(&candidate) {
                    Ok(canonical) => resolved = canonical,
                    Err(_) => {
                        missing = true;
                        resolved = candidate;
                    }
                }
            }
        }
    }
    Ok(resolved)
}
