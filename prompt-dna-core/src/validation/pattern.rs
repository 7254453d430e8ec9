use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

/// Checks length bounds (in characters), then requires `pattern` to match
/// at the start of `value`. The match does not have to reach the end.
pub fn validate_string_pattern<'a>(
    value: &'a str,
    pattern: &str,
    name: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<&'a str> {
    let length = value.chars().count();

    if let Some(min) = min_length {
        if length < min {
            return Err(Error::Validation(format!(
                "{name} must be at least {min} characters"
            )));
        }
    }

    if let Some(max) = max_length {
        if length > max {
            return Err(Error::Validation(format!(
                "{name} must be at most {max} characters"
            )));
        }
    }

    let matcher = Regex::new(pattern)
        .map_err(|err| Error::Validation(format!("invalid pattern for {name}: {err}")))?;
    // leftmost-first: a match at offset 0 exists iff the first match starts there
    let matches_at_start = matcher.find(value).is_some_and(|found| found.start() == 0);
    if !matches_at_start {
        return Err(Error::Validation(format!(
            "{name} must match pattern: {pattern}"
        )));
    }

    Ok(value)
}

pub fn validate_json_string_pattern<'a>(
    value: &'a Value,
    pattern: &str,
    name: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<&'a str> {
    let Some(text) = value.as_str() else {
        return Err(Error::Validation(format!(
            "{name} must be a string, got {}",
            json_kind(value)
        )));
    };
    validate_string_pattern(text, pattern, name, min_length, max_length)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
