//! LLM response post-processing
//!
//! The rewriter is asked for a single JSON object but models wrap it in
//! prose or code fences often enough that extraction has to be
//! tolerant. Malformed JSON or missing required fields is a hard
//! failure; missing optional arrays degrade to empty with a warning.

use newsforge_common::errors::{AppError, Result};
use newsforge_common::MAX_TOPICS;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Structured article produced by the LLM rewrite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub category: String,
    pub source_urls: Vec<String>,
    pub image_gen_prompts: Vec<String>,
    pub topics: Vec<String>,
}

/// Extract the first top-level `{...}` block from raw completion text.
///
/// Brace depth is tracked string-aware, so braces inside JSON string
/// values do not terminate the scan.
pub fn extract_json_object(raw: &str) -> Result<&str> {
    let start = raw.find('{').ok_or_else(|| AppError::LlmResponseError {
        message: "No JSON object found in completion".to_string(),
    })?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&raw[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Err(AppError::LlmResponseError {
        message: "Unterminated JSON object in completion".to_string(),
    })
}

/// Parse raw completion text into a [`GeneratedArticle`].
///
/// `title`, `body`, `excerpt`, and `category` are required strings;
/// their absence fails the parse. The three array fields are
/// recoverable: anything non-conforming becomes an empty list.
pub fn parse_generated(raw: &str) -> Result<GeneratedArticle> {
    let json = extract_json_object(raw)?;
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| AppError::LlmResponseError {
            message: format!("Invalid JSON in completion: {}", e),
        })?;

    let required = |field: &str| -> Result<String> {
        value
            .get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::LlmResponseError {
                message: format!("Missing or empty required field: {}", field),
            })
    };

    let lenient_array = |field: &str| -> Vec<String> {
        match value.get(field).and_then(|v| v.as_array()) {
            Some(arr) => arr
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            None => {
                warn!(field = field, "Completion missing array field, defaulting to empty");
                Vec::new()
            }
        }
    };

    Ok(GeneratedArticle {
        title: required("title")?,
        body: required("body")?,
        excerpt: required("excerpt")?,
        category: required("category")?,
        source_urls: lenient_array("source_urls"),
        image_gen_prompts: lenient_array("image_gen_prompts"),
        topics: lenient_array("topics"),
    })
}

/// Sanitize topics: single alphanumeric-edged tokens, length >= 2,
/// case-insensitively deduplicated preserving first-seen casing and
/// order, capped at [`MAX_TOPICS`].
pub fn sanitize_topics(topics: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();

    for raw in topics {
        let trimmed = raw.trim().trim_matches(|c: char| !c.is_alphanumeric());

        if trimmed.is_empty()
            || trimmed.chars().any(char::is_whitespace)
            || trimmed.chars().count() < 2
        {
            continue;
        }

        let lower = trimmed.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }

        seen.push(lower);
        out.push(trimmed.to_string());

        if out.len() == MAX_TOPICS {
            break;
        }
    }

    out
}

/// Boundary for standalone topic matching: topics like "GPT-4" or "C++"
/// keep their own `#`, `+`, `-` characters, so those never terminate a
/// word either.
fn is_topic_boundary(c: char) -> bool {
    !c.is_alphanumeric() && !matches!(c, '#' | '+' | '-')
}

/// Find the first standalone occurrence of `topic` in `body`,
/// ASCII-case-insensitively, returning its byte range.
fn find_standalone(body: &str, topic: &str) -> Option<usize> {
    let body_bytes = body.as_bytes();
    let topic_bytes = topic.as_bytes();
    let len = topic_bytes.len();

    if len == 0 || len > body_bytes.len() {
        return None;
    }

    for i in 0..=body_bytes.len() - len {
        if !body.is_char_boundary(i) || !body.is_char_boundary(i + len) {
            continue;
        }
        if !body_bytes[i..i + len].eq_ignore_ascii_case(topic_bytes) {
            continue;
        }

        let before_ok = body[..i]
            .chars()
            .next_back()
            .map(is_topic_boundary)
            .unwrap_or(true);
        let after_ok = body[i + len..]
            .chars()
            .next()
            .map(is_topic_boundary)
            .unwrap_or(true);

        if before_ok && after_ok {
            return Some(i);
        }
    }

    None
}

/// Ensure each topic appears bolded once in the body.
///
/// Topics already present as `**Topic**` (case-insensitive) are left
/// alone. Otherwise the first standalone occurrence is wrapped in
/// `**...**`, preserving the body's casing. Topics that never occur in
/// the body are left unannotated.
pub fn bold_topics(body: &str, topics: &[String]) -> String {
    let mut result = body.to_string();

    for topic in topics {
        let already = format!("**{}**", topic.to_lowercase());
        if result.to_lowercase().contains(&already) {
            continue;
        }

        if let Some(i) = find_standalone(&result, topic) {
            let end = i + topic.len();
            result = format!("{}**{}**{}", &result[..i], &result[i..end], &result[end..]);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        let raw = r#"{"title": "T"}"#;
        assert_eq!(extract_json_object(raw).unwrap(), raw);
    }

    #[test]
    fn test_extract_wrapped_object() {
        let raw = "Sure! Here is the article:\n```json\n{\"title\": \"T\"}\n```\nHope it helps.";
        assert_eq!(extract_json_object(raw).unwrap(), r#"{"title": "T"}"#);
    }

    #[test]
    fn test_extract_braces_inside_strings() {
        let raw = r#"{"body": "code: { nested } done"}"#;
        assert_eq!(extract_json_object(raw).unwrap(), raw);
    }

    #[test]
    fn test_extract_no_object_is_error() {
        assert!(extract_json_object("no json here").is_err());
        assert!(extract_json_object("{ unterminated").is_err());
    }

    #[test]
    fn test_parse_requires_core_fields() {
        let raw = r#"{"title": "T", "body": "B", "excerpt": "E"}"#;
        let err = parse_generated(raw).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_parse_defaults_missing_arrays() {
        let raw = r#"{"title": "T", "body": "B", "excerpt": "E", "category": "tech"}"#;
        let article = parse_generated(raw).unwrap();
        assert!(article.topics.is_empty());
        assert!(article.image_gen_prompts.is_empty());
        assert!(article.source_urls.is_empty());
    }

    #[test]
    fn test_parse_malformed_json_is_error() {
        assert!(parse_generated(r#"{"title": "T",}"#).is_err());
    }

    #[test]
    fn test_sanitize_topics_reference_case() {
        let input: Vec<String> = ["AI", "ai", "Machine Learning", "A", "GPT-4"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(sanitize_topics(&input), vec!["AI", "GPT-4"]);
    }

    #[test]
    fn test_sanitize_strips_edge_punctuation() {
        let input = vec!["  #Rust!  ".to_string(), "(quantum)".to_string()];
        assert_eq!(sanitize_topics(&input), vec!["Rust", "quantum"]);
    }

    #[test]
    fn test_sanitize_caps_at_ten() {
        let input: Vec<String> = (0..15).map(|i| format!("topic{i}")).collect();
        assert_eq!(sanitize_topics(&input).len(), MAX_TOPICS);
    }

    #[test]
    fn test_bold_first_occurrence_only() {
        let body = "OpenAI released GPT-4 today. GPT-4 is fast.";
        let out = bold_topics(body, &["GPT-4".to_string()]);

        assert_eq!(out, "OpenAI released **GPT-4** today. GPT-4 is fast.");
        assert_eq!(out.matches("**GPT-4**").count(), 1);
    }

    #[test]
    fn test_bold_preserves_body_casing() {
        let body = "The openai model improved.";
        let out = bold_topics(body, &["OpenAI".to_string()]);
        assert_eq!(out, "The **openai** model improved.");
    }

    #[test]
    fn test_bold_skips_already_bolded() {
        let body = "We tested **GPT-4** thoroughly. GPT-4 passed.";
        let out = bold_topics(body, &["gpt-4".to_string()]);
        assert_eq!(out, body);
    }

    #[test]
    fn test_bold_requires_standalone_occurrence() {
        // "ai" embedded in "brain" must not be bolded
        let body = "The brain adapts quickly.";
        let out = bold_topics(body, &["ai".to_string()]);
        assert_eq!(out, body);
    }

    #[test]
    fn test_bold_missing_topic_is_noop() {
        let body = "Nothing relevant here.";
        let out = bold_topics(body, &["Quantum".to_string()]);
        assert_eq!(out, body);
    }
}
