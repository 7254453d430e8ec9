use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const PYTHON_ALIASES: [&str; 2] = ["python", "py"];
const NODEJS_ALIASES: [&str; 6] = ["nodejs", "node", "javascript", "js", "typescript", "ts"];

/// Supported target languages. TypeScript and JavaScript both run on Node.js.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "nodejs")]
    NodeJs,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::NodeJs => "nodejs",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        validate_language_support(value)
    }
}

pub fn validate_language_support(language: &str) -> Result<Language> {
    let normalized = language.trim().to_lowercase();

    if PYTHON_ALIASES.contains(&normalized.as_str()) {
        return Ok(Language::Python);
    }
    if NODEJS_ALIASES.contains(&normalized.as_str()) {
        return Ok(Language::NodeJs);
    }

    Err(Error::Validation(format!(
        "unsupported language: {language}. \
         Supported languages: Python, Node.js (JavaScript/TypeScript)"
    )))
}
