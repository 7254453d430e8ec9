use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const SEGMENT_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    Patterns,
    Context,
    Decisions,
    Constraints,
}

impl ContextType {
    pub const ALL: [ContextType; 4] = [
        Self::Patterns,
        Self::Context,
        Self::Decisions,
        Self::Constraints,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patterns => "patterns",
            Self::Context => "context",
            Self::Decisions => "decisions",
            Self::Constraints => "constraints",
        }
    }
}

impl std::fmt::Display for ContextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| {
                let allowed = Self::ALL.map(Self::as_str).join(", ");
                Error::Validation(format!(
                    "context type must be one of [{allowed}], got: {value}"
                ))
            })
    }
}

/// A validated `namespace:branch:feature:context_type` key, e.g.
/// `prompt_dna:main:001-repo-setup:patterns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryKey<'a> {
    pub namespace: &'a str,
    pub branch: &'a str,
    pub feature: &'a str,
    pub context_type: ContextType,
}

impl<'a> MemoryKey<'a> {
    pub fn parse(key: &'a str) -> Result<Self> {
        let parts: Vec<&str> = key.split(':').collect();
        let [namespace, branch, feature, context_type] = parts[..] else {
            return Err(Error::Validation(format!(
                "memory key must have format namespace:branch:feature:context_type, got: {key}"
            )));
        };

        check_segment("namespace", namespace)?;
        check_segment("branch", branch)?;
        check_segment("feature", feature)?;
        let context_type = context_type.parse()?;

        Ok(Self {
            namespace,
            branch,
            feature,
            context_type,
        })
    }
}

impl std::fmt::Display for MemoryKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.namespace, self.branch, self.feature, self.context_type
        )
    }
}

pub fn validate_memory_key(key: &str) -> Result<&str> {
    MemoryKey::parse(key)?;
    Ok(key)
}

fn check_segment(label: &str, segment: &str) -> Result<()> {
    static MATCHER: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    let matcher = MATCHER
        .get_or_init(|| Regex::new(SEGMENT_PATTERN))
        .as_ref()
        .map_err(|err| Error::Validation(format!("invalid memory key pattern: {err}")))?;

    if !matcher.is_match(segment) {
        return Err(Error::Validation(format!(
            "{label} must contain only alphanumeric, underscore, and hyphen characters: {segment}"
        )));
    }
    Ok(())
}
