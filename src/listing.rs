//! Parsing of model output into a listing value
//!
//! The model is instructed to answer with bare JSON, but in practice it
//! often wraps the payload in a markdown code fence. Only that exact
//! delimiter pair is stripped; any other surrounding prose is left in
//! place and makes the parse fail, which surfaces as a request error.
//! The parsed value is kept untyped (`serde_json::Value`) since the
//! model's schema is a convention, not a contract.

use crate::error::{Result, ToplistError};
use serde_json::Value;

/// Strip a surrounding markdown JSON code fence, if present
///
/// Removes a leading ```` ```json ```` (or bare ```` ``` ````) delimiter
/// and a trailing ```` ``` ```` delimiter together with surrounding
/// whitespace. Text without a leading fence is returned trimmed and
/// otherwise untouched.
///
/// # Arguments
///
/// * `raw` - The raw reply text from the model
///
/// # Examples
///
/// ```
/// use toplist::listing::strip_json_fences;
///
/// assert_eq!(strip_json_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_json_fences("{\"a\": 1}"), "{\"a\": 1}");
/// ```
pub fn strip_json_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    rest.trim()
}

/// Parse a model reply into a listing value
///
/// Strips an optional code fence, then parses the remainder as JSON.
///
/// # Arguments
///
/// * `raw` - The raw reply text from the model
///
/// # Errors
///
/// Returns a parse error if the stripped text is not valid JSON. The
/// error propagates to the request handler; there is no retry or
/// fallback.
pub fn parse_listing(raw: &str) -> Result<Value> {
    let stripped = strip_json_fences(raw);
    serde_json::from_str(stripped)
        .map_err(|e| ToplistError::Parse(format!("model reply is not valid JSON: {}", e)).into())
}
