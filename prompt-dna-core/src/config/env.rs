use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Key/value state that configuration is read from.
pub trait EnvStore: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;

    fn set_var(&self, key: &str, value: &str);
}

/// The process environment. Writes are visible process-wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }

    fn set_var(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_var(&self, key: &str) -> Option<String> {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            vars: RwLock::new(vars),
        }
    }
}

impl EnvStore for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_var(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }
}
