//! Reply normalizer — recovers the structured evaluation report from a
//! free-text model reply.
//!
//! Model replies usually contain a JSON object, sometimes wrapped in markdown
//! code fences, sometimes surrounded by commentary. Recovery is a fixed
//! sequence of literal prefix/suffix strips followed by brace slicing; the
//! order is observable behavior and must not be rearranged.

use serde_json::{Map, Value};
use thiserror::Error;

/// Keys every evaluation report must carry.
const REQUIRED_FIELDS: [&str; 3] = ["JD Match", "MissingKeywords", "Profile Summary"];

/// Longest reply excerpt attached to a normalization error.
const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The cleaned reply contains no `{ ... }` region at all.
    #[error("no JSON object found in model reply")]
    NoJsonObject { excerpt: String },

    /// A candidate region was found but does not parse as a JSON object.
    #[error("model reply is not a valid JSON object: {detail}")]
    InvalidJson { excerpt: String, detail: String },
}

/// Normalizes a raw model reply into an evaluation report.
///
/// On success the returned object is guaranteed to contain all of
/// [`REQUIRED_FIELDS`]: a missing `MissingKeywords` becomes an empty array,
/// any other missing field becomes the string `"Not available"`. Field
/// values are passed through exactly as the model produced them — only
/// presence is repaired.
pub fn normalize_reply(raw: &str) -> Result<Map<String, Value>, NormalizeError> {
    let mut cleaned = raw.trim();

    // Two independent prefix checks: a reply opening with ```json must not
    // leave a second leading fence behind.
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    let cleaned = cleaned.trim();

    let open = cleaned.find('{');
    let close = cleaned.rfind('}');
    let (Some(open), Some(close)) = (open, close) else {
        return Err(NormalizeError::NoJsonObject {
            excerpt: excerpt(cleaned),
        });
    };

    // A closing brace before the first opening brace yields an empty
    // candidate, which fails the parse below instead of panicking on a
    // reversed range.
    let candidate = if open <= close {
        &cleaned[open..=close]
    } else {
        ""
    };

    let parsed: Value =
        serde_json::from_str(candidate).map_err(|e| NormalizeError::InvalidJson {
            excerpt: excerpt(candidate),
            detail: e.to_string(),
        })?;

    // A well-formed non-object (array, scalar) cannot carry the report
    // fields; reject it rather than coerce.
    let Value::Object(mut report) = parsed else {
        return Err(NormalizeError::InvalidJson {
            excerpt: excerpt(candidate),
            detail: "top-level JSON value is not an object".to_string(),
        });
    };

    for field in REQUIRED_FIELDS {
        if !report.contains_key(field) {
            let default = if field == "MissingKeywords" {
                Value::Array(Vec::new())
            } else {
                Value::String("Not available".to_string())
            };
            report.insert(field.to_string(), default);
        }
    }

    Ok(report)
}

/// Bounded excerpt: at most [`EXCERPT_CHARS`] characters, with a truncation
/// marker appended when anything was cut.
fn excerpt(text: &str) -> String {
    if text.chars().count() > EXCERPT_CHARS {
        let head: String = text.chars().take(EXCERPT_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
