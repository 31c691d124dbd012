//! Locating and decoding JSON inside model output.
//!
//! Models often wrap JSON in a ```json fence or surround it with prose. The first
//! fenced block wins; otherwise the first `{` or `[` that starts a complete JSON
//! value is decoded and anything after that value is ignored.

use serde_json::Value as Json;

use super::ParseFailure;

/// Decodes the JSON payload of `text`.
pub(crate) fn parse_json(text: &str) -> Result<Json, ParseFailure> {
    let candidate = extract_json(text);
    let mut first_error = None;
    for (start, _) in candidate.match_indices(|c: char| c == '{' || c == '[') {
        match leading_value(&candidate[start..]) {
            Ok(value) => return Ok(value),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    let error = match first_error {
        Some(e) => e,
        None => return serde_json::from_str(candidate).map_err(invalid_json),
    };
    Err(invalid_json(error))
}

/// The fenced block of `text` if there is one, otherwise the trimmed text.
pub(crate) fn extract_json(text: &str) -> &str {
    match fenced_block(text) {
        Some(block) => block.trim(),
        None => text.trim(),
    }
}

/// Decodes the JSON value at the start of `text`, ignoring whatever follows it.
fn leading_value(text: &str) -> Result<Json, serde_json::Error> {
    match serde_json::Deserializer::from_str(text).into_iter::<Json>().next() {
        Some(result) => result,
        None => serde_json::from_str(text),
    }
}

fn invalid_json(e: serde_json::Error) -> ParseFailure {
    ParseFailure::InvalidJson(e.to_string())
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // Skip the info string (`json`) up to the end of the opening line.
    let body_start = match after.find('\n') {
        Some(i) if !after[..i].contains('{') && !after[..i].contains('[') => i + 1,
        _ => 0,
    };
    let body = &after[body_start..];
    let end = body.find("```").unwrap_or(body.len());
    Some(&body[..end])
}
