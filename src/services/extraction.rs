//! Best-effort recovery of a JSON object embedded in free-text model output.

use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde_json::Value;

/// Greedy: first `{` through last `}`, across newlines.
fn json_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("JSON block pattern is valid"))
}

/// Why a reply could not be turned into structured data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnrecognizedReason {
    /// No brace-delimited block exists in the reply.
    NoJsonBlock,
    /// A block was found but is not valid JSON.
    Malformed(String),
}

impl fmt::Display for UnrecognizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnrecognizedReason::NoJsonBlock => f.write_str("no JSON object found in the reply"),
            UnrecognizedReason::Malformed(err) => write!(f, "malformed JSON: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Structured(Value),
    Unrecognized {
        raw: String,
        reason: UnrecognizedReason,
    },
}

/// The brace-delimited block the parser will attempt, if any.
pub fn find_json_block(text: &str) -> Option<&str> {
    json_block_pattern().find(text).map(|m| m.as_str())
}

/// Parse the first brace-delimited block of `text`.
///
/// No repair is attempted: a reply whose outer braces do not enclose one
/// valid JSON value is `Unrecognized`, carrying the full original text.
pub fn extract_structured(text: &str) -> Extraction {
    let Some(block) = find_json_block(text) else {
        return Extraction::Unrecognized {
            raw: text.to_string(),
            reason: UnrecognizedReason::NoJsonBlock,
        };
    };

    match serde_json::from_str::<Value>(block) {
        Ok(value) => Extraction::Structured(value),
        Err(err) => Extraction::Unrecognized {
            raw: text.to_string(),
            reason: UnrecognizedReason::Malformed(err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_bare_object() {
        let extraction = extract_structured(r#"{"hotel": {"name": "Ritz"}}"#);
        assert_eq!(
            extraction,
            Extraction::Structured(json!({"hotel": {"name": "Ritz"}}))
        );
    }

    #[test]
    fn test_extracts_object_surrounded_by_prose() {
        let reply = "Here is your plan:\n```json\n{\n  \"activities\": [{\"day\": 1}],\n  \"flights\": {\"airline\": \"Delta\"}\n}\n```\nEnjoy your trip!";
        assert_eq!(
            extract_structured(reply),
            Extraction::Structured(json!({
                "activities": [{"day": 1}],
                "flights": {"airline": "Delta"}
            }))
        );
    }

    #[test]
    fn test_no_braces_keeps_raw_text() {
        let reply = "Sorry, I cannot help with that.";
        assert_eq!(
            extract_structured(reply),
            Extraction::Unrecognized {
                raw: reply.to_string(),
                reason: UnrecognizedReason::NoJsonBlock,
            }
        );
    }

    #[test]
    fn test_malformed_block_keeps_raw_text() {
        let reply = "Plan: {\"flights\": {\"airline\": }";
        match extract_structured(reply) {
            Extraction::Unrecognized {
                raw,
                reason: UnrecognizedReason::Malformed(_),
            } => assert_eq!(raw, reply),
            other => panic!("unexpected extraction: {other:?}"),
        }
    }

    #[test]
    fn test_block_is_greedy() {
        // Two objects: the match spans both, which is not valid JSON.
        let reply = "{\"a\": 1} and {\"b\": 2}";
        assert_eq!(find_json_block(reply), Some(reply));
        assert!(matches!(
            extract_structured(reply),
            Extraction::Unrecognized { .. }
        ));
    }
}
