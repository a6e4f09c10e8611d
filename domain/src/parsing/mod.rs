//! Extraction of structured payloads from untrusted model text.
//!
//! Every stage prompts the model for "ONLY valid JSON", and every stage gets
//! back whatever the model felt like writing: often the JSON wrapped in
//! markdown code fences, sometimes prose, sometimes nothing. This module is
//! the single place that boundary is crossed: all three stages sanitize and
//! parse through [`extract_payload`], so the sanitizer and the stage parsers
//! cannot drift apart.
//!
//! Parse failures are never retried or repaired. The error carries only the
//! head of the offending text, bounded to keep event and log sizes sane.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Maximum number of characters of raw model output attached to a parse error.
pub const SNIPPET_LEN: usize = 200;

/// The model's response could not be parsed as the expected JSON shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("returned invalid JSON: {snippet}")]
pub struct ExtractError {
    /// First [`SNIPPET_LEN`] characters of the raw (pre-sanitization) text
    pub snippet: String,
}

/// Remove markdown code-fence wrappers from raw model output and trim.
///
/// Strips every ```` ```json ```` and ```` ``` ```` marker (with or without
/// a trailing newline) anywhere in the text, mirroring how lenient the
/// matching has to be in practice: models emit fences mid-text, unterminated,
/// or with leading prose around them.
pub fn strip_markdown_fences(raw: &str) -> String {
    raw.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Bounded head of an untrusted string, safe on multi-byte content.
pub fn head_snippet(raw: &str) -> String {
    raw.chars().take(SNIPPET_LEN).collect()
}

/// Parse a typed payload out of raw model text.
///
/// Sanitizes with [`strip_markdown_fences`], then deserializes. On failure
/// the returned [`ExtractError`] carries the head of the raw text for
/// diagnosis, never the full response.
pub fn extract_payload<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractError> {
    let cleaned = strip_markdown_fences(raw);
    serde_json::from_str(&cleaned).map_err(|_| ExtractError {
        snippet: head_snippet(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        name: String,
        count: u32,
    }

    #[test]
    fn strips_json_fence_pair() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_markdown_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fences() {
        let raw = "```\n{\"a\": 1}\n```\n";
        assert_eq!(strip_markdown_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn strips_fence_without_trailing_newline() {
        assert_eq!(strip_markdown_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn plain_json_passes_through_trimmed() {
        assert_eq!(strip_markdown_fences("  {\"a\": 1}  \n"), "{\"a\": 1}");
    }

    #[test]
    fn extracts_fenced_payload() {
        let raw = "```json\n{\"name\": \"acme\", \"count\": 3}\n```";
        let payload: Payload = extract_payload(raw).unwrap();
        assert_eq!(
            payload,
            Payload {
                name: "acme".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn prose_around_json_still_fails() {
        // Fence stripping does not rescue payloads buried in prose; that is
        // a hard stage failure, not a repair case.
        let raw = "Here is the result: {\"name\": \"acme\", \"count\": 3}";
        let err = extract_payload::<Payload>(raw).unwrap_err();
        assert!(err.snippet.starts_with("Here is the result"));
    }

    #[test]
    fn error_snippet_is_bounded() {
        let raw = "x".repeat(1000);
        let err = extract_payload::<Payload>(&raw).unwrap_err();
        assert_eq!(err.snippet.chars().count(), SNIPPET_LEN);
    }

    #[test]
    fn error_snippet_respects_char_boundaries() {
        let raw = "é".repeat(300);
        let err = extract_payload::<Payload>(&raw).unwrap_err();
        assert_eq!(err.snippet.chars().count(), SNIPPET_LEN);
    }

    #[test]
    fn empty_output_is_a_parse_failure() {
        let err = extract_payload::<Payload>("").unwrap_err();
        assert_eq!(err.snippet, "");
    }

    #[test]
    fn wrong_shape_is_a_parse_failure() {
        let err = extract_payload::<Payload>("{\"name\": \"acme\"}").unwrap_err();
        assert!(err.snippet.contains("acme"));
    }
}
