//! Locates and parses the trend array embedded in a wrapper document.
//!
//! Upstream alternates between handing over a raw trend array and a full
//! response wrapper whose trends sit inside `output[].content[].text` as a
//! JSON string, optionally inside a fenced code block. Extraction tries an
//! ordered list of strategies and returns the first that succeeds; there is
//! no partial success, the result is always a whole array or an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::model::Trend;
use crate::error::{FactoryError, FactoryResult};

/// A fenced ```json block wrapping a JSON array of objects, matched greedily
/// across lines.
static FENCED_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(\[\s*\{.*\}\s*\])\s*```").unwrap());

/// Locates a candidate JSON array inside one text blob.
type TextStrategy = fn(&str) -> Option<&str>;

/// Ordered locators applied to each `output_text` blob; the first one that
/// yields a candidate decides, and a candidate that fails to parse aborts
/// extraction rather than falling through.
const TEXT_STRATEGIES: &[TextStrategy] = &[fenced_json_block, bare_array_text];

fn fenced_json_block(text: &str) -> Option<&str> {
    FENCED_ARRAY
        .captures(text)
        .map(|caps| caps.get(1).expect("capture group 1").as_str())
}

fn bare_array_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (trimmed.starts_with('[') && trimmed.ends_with(']')).then_some(trimmed)
}

/// Extracts the trend records from a wrapper document.
///
/// Accepts either a raw array of trend records (returned as-is) or a
/// response wrapper whose first element carries an `output` message list
/// with the trends embedded in a text block. Fails with
/// [`FactoryError::MalformedInput`] when no parseable array can be located.
pub fn extract_trends(wrapper: &Value) -> FactoryResult<Vec<Trend>> {
    // Strategy 1: already a list of trends, no unwrapping needed.
    if let Some(result) = as_trend_list(wrapper) {
        return result;
    }

    let items = wrapper
        .as_array()
        .filter(|arr| !arr.is_empty())
        .ok_or_else(|| {
            FactoryError::malformed_input("expected a list wrapper or list of trends")
        })?;

    let output = items[0]
        .get("output")
        .and_then(Value::as_array)
        .filter(|arr| !arr.is_empty())
        .ok_or_else(|| FactoryError::malformed_input("no output field found in wrapper"))?;

    // Strategies 2 and 3: scan message text blocks for an embedded array.
    for msg in output {
        if msg.get("type").and_then(Value::as_str) != Some("message") {
            continue;
        }
        let Some(content) = msg.get("content").and_then(Value::as_array) else {
            continue;
        };
        for block in content {
            if block.get("type").and_then(Value::as_str) != Some("output_text") {
                continue;
            }
            let text = block.get("text").and_then(Value::as_str).unwrap_or("");
            for locate in TEXT_STRATEGIES {
                if let Some(candidate) = locate(text) {
                    return serde_json::from_str(candidate).map_err(Into::into);
                }
            }
        }
    }

    Err(FactoryError::malformed_input(
        "could not locate embedded trends",
    ))
}

/// Returns the wrapper itself when it is already a non-empty trend array.
fn as_trend_list(value: &Value) -> Option<FactoryResult<Vec<Trend>>> {
    let first = value.as_array()?.first()?.as_object()?;
    if !first.contains_key("trend_name") {
        return None;
    }
    Some(serde_json::from_value(value.clone()).map_err(Into::into))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrap_text(text: &str) -> Value {
        json!([{
            "output": [{
                "type": "message",
                "content": [{ "type": "output_text", "text": text }]
            }]
        }])
    }

    #[test]
    fn test_fenced_block_round_trip() {
        let wrapper = wrap_text("```json\n[{\"trend_name\":\"Sunset\"}]\n```");
        let trends = extract_trends(&wrapper).unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].trend_name, "Sunset");
    }

    #[test]
    fn test_fenced_block_inside_narrative() {
        let wrapper = wrap_text(
            "Here are the trends you asked for:\n\n```json\n[{\"trend_name\":\"Dark Academia\"}]\n```\n\nLet me know!",
        );
        let trends = extract_trends(&wrapper).unwrap();
        assert_eq!(trends[0].trend_name, "Dark Academia");
    }

    #[test]
    fn test_bare_array_text() {
        let wrapper = wrap_text("  [{\"trend_name\":\"Coastal Grandma\"}]  ");
        let trends = extract_trends(&wrapper).unwrap();
        assert_eq!(trends[0].trend_name, "Coastal Grandma");
    }

    #[test]
    fn test_already_normalized_passthrough() {
        // A raw trend array is returned unchanged, no unwrapping attempted.
        let raw = json!([{ "trend_name": "X", "style_variants": {} }]);
        let trends = extract_trends(&raw).unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].trend_name, "X");
    }

    #[test]
    fn test_missing_output_field() {
        let err = extract_trends(&json!([{ "id": "resp-1" }])).unwrap_err();
        assert!(err.to_string().contains("no output field"));
    }

    #[test]
    fn test_non_array_wrapper() {
        let err = extract_trends(&json!({ "output": [] })).unwrap_err();
        assert!(err.to_string().contains("expected a list wrapper"));
    }

    #[test]
    fn test_no_parseable_block_fails_whole_call() {
        let wrapper = wrap_text("just prose, no JSON here");
        let err = extract_trends(&wrapper).unwrap_err();
        assert!(err.to_string().contains("could not locate embedded trends"));
    }

    #[test]
    fn test_corrupt_fenced_block_is_an_error() {
        // A located candidate that fails to parse aborts extraction instead
        // of falling through to later blocks.
        let wrapper = wrap_text("```json\n[{\"trend_name\": oops}]\n```");
        assert!(extract_trends(&wrapper).is_err());
    }

    #[test]
    fn test_skips_non_message_entries() {
        let wrapper = json!([{
            "output": [
                { "type": "reasoning", "content": [] },
                {
                    "type": "message",
                    "content": [
                        { "type": "refusal", "text": "n/a" },
                        { "type": "output_text", "text": "[{\"trend_name\":\"Y2K\"}]" }
                    ]
                }
            ]
        }]);
        let trends = extract_trends(&wrapper).unwrap();
        assert_eq!(trends[0].trend_name, "Y2K");
    }
}
