//! JSON extraction utilities
//!
//! Even when asked for `application/json`, providers occasionally wrap the
//! payload in a markdown fence or prefix it with a sentence. Extraction
//! tries, in order:
//! 1. the body of a ```json code block
//! 2. the whole trimmed text, when it already starts with `{` or `[`
//! 3. the outermost `{...}` or `[...]` span, whichever opens first

use crate::malformed_response;
use crate::types::*;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CODE_BLOCK_REGEX: Regex = Regex::new(r"```(?:json)?\s*\n([\s\S]*?)\n\s*```").unwrap();
    static ref JSON_OBJECT_REGEX: Regex = Regex::new(r"\{[\s\S]*\}").unwrap();
    static ref JSON_ARRAY_REGEX: Regex = Regex::new(r"\[[\s\S]*\]").unwrap();
}

/// Return the JSON slice of `text`, or a malformed-response error when
/// nothing looks like JSON
pub fn extract_json(text: &str) -> ShowcaseResult<&str> {
    extract_from_code_block(text)
        .or_else(|| extract_raw_text(text))
        .or_else(|| extract_embedded(text))
        .ok_or_else(|| malformed_response!("No JSON content found in response", text.to_string()))
}

/// Extract and parse in one step
pub fn parse_json(text: &str) -> ShowcaseResult<serde_json::Value> {
    let json = extract_json(text)?;
    serde_json::from_str(json).map_err(|e| {
        malformed_response!(format!("Failed to parse JSON: {}", e), json.to_string(), e)
    })
}

fn extract_from_code_block(text: &str) -> Option<&str> {
    CODE_BLOCK_REGEX
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

fn extract_raw_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        Some(trimmed)
    } else {
        None
    }
}

fn extract_embedded(text: &str) -> Option<&str> {
    let object = JSON_OBJECT_REGEX.find(text);
    let array = JSON_ARRAY_REGEX.find(text);
    match (object, array) {
        (Some(o), Some(a)) if a.start() < o.start() => Some(a.as_str()),
        (Some(o), _) => Some(o.as_str()),
        (None, Some(a)) => Some(a.as_str()),
        (None, None) => None,
    }
}
