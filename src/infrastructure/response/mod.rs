use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::domain::error::{AppError, Result};

static LEADING_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```[A-Za-z0-9_+-]*\s*").unwrap());

static TRAILING_FENCE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*```\s*$").unwrap());

const PREVIEW_CHARS: usize = 240;

/// Cuts model output down to the JSON object it carries.
///
/// Fence markers around the text are dropped, then everything outside the
/// first `{` and the last `}` is discarded. Braces inside string literals are
/// not understood; text without a usable brace pair comes back trimmed.
pub fn normalize_json_response(text: &str) -> String {
    let cleaned = LEADING_FENCE_PATTERN.replace(text, "");
    let cleaned = TRAILING_FENCE_PATTERN.replace(&cleaned, "");

    let first_open = cleaned.find('{');
    let last_close = cleaned.rfind('}');

    match (first_open, last_close) {
        (Some(start), Some(end)) if end > start => cleaned[start..=end].trim().to_string(),
        _ => cleaned.trim().to_string(),
    }
}

/// Normalizes `text` and decodes it into `T`.
pub fn decode_json_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    let normalized = normalize_json_response(text);
    serde_json::from_str::<T>(&normalized).map_err(|err| {
        AppError::MalformedContent(format!(
            "{} | output_snippet={}",
            err,
            preview_text(&normalized, PREVIEW_CHARS)
        ))
    })
}

pub fn preview_text(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        a: i32,
    }

    #[test]
    fn test_fenced_block_after_prose() {
        let input = "Sure!\n```json\n{\"a\":1}\n```";
        assert_eq!(normalize_json_response(input), "{\"a\":1}");
        let decoded: Sample = decode_json_response(input).unwrap();
        assert_eq!(decoded, Sample { a: 1 });
    }

    #[test]
    fn test_leading_fence_without_language_tag() {
        let input = "```\n{\"a\": 2}\n```\n";
        assert_eq!(normalize_json_response(input), "{\"a\": 2}");
    }

    #[test]
    fn test_prose_on_both_sides() {
        let input = "Here you go: {\"a\": {\"b\": [1, 2]}} Hope this helps.";
        assert_eq!(normalize_json_response(input), "{\"a\": {\"b\": [1, 2]}}");
    }

    #[test]
    fn test_no_braces_returns_trimmed_text() {
        assert_eq!(
            normalize_json_response("  I cannot help with that.  \n"),
            "I cannot help with that."
        );
    }

    #[test]
    fn test_reversed_braces_are_left_alone() {
        assert_eq!(normalize_json_response(" } oops { "), "} oops {");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Sure!\n```json\n{\"a\":1}\n```",
            "{\"questions\": []}",
            "no json at all",
            "```json\n{\"text\": \"a ``` b\"}\n```",
        ];
        for input in inputs {
            let once = normalize_json_response(input);
            assert_eq!(normalize_json_response(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_prefix_object_suffix_contract() {
        let body = "\"passage\": \"Tides\", \"questions\": [{\"id\": \"q1\"}]";
        for (prefix, suffix) in [("", ""), ("Result:\n", "\nDone."), ("  ", "  ")] {
            let input = format!("{prefix}{{{body}}}{suffix}");
            assert_eq!(normalize_json_response(&input), format!("{{{body}}}"));
        }
    }

    #[test]
    fn test_undecodable_slice_is_malformed_content() {
        let err = decode_json_response::<Sample>("```json\n{\"a\": }\n```").unwrap_err();
        match err {
            AppError::MalformedContent(msg) => assert!(msg.contains("output_snippet={\"a\": }")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_preview_is_bounded() {
        assert_eq!(preview_text("abcdef", 3), "abc...");
        assert_eq!(preview_text("abc", 3), "abc");
    }
}
