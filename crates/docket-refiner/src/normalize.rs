//! Normalize raw completion text into model output

use docket_domain::{CategorizedIntents, ErrorSentinel};
use serde_json::Value;
use tracing::warn;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Strip surrounding whitespace and code-fence decoration
///
/// Only a leading fence (with an optional language tag) and a trailing fence
/// are removed. Backticks inside the payload are left alone.
pub fn clean_response(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = strip_language_tag(rest).trim();
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest.trim();
    }

    text
}

/// Clean completion text and parse it as JSON
///
/// Never fails: text that is not valid JSON after cleaning comes back as the
/// parse-failure sentinel carrying the cleaned text.
pub fn normalize_response(raw: &str) -> CategorizedIntents {
    let cleaned = clean_response(raw);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => CategorizedIntents::Parsed(value),
        Err(e) => {
            warn!("Completion is not valid JSON ({}); keeping raw response", e);
            CategorizedIntents::Failed(ErrorSentinel::parse_failure(cleaned))
        }
    }
}

/// Drop a language tag such as `json` right after an opening fence
fn strip_language_tag(text: &str) -> &str {
    let is_tag_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+');

    if let Some(tag) = text.get(..JSON_TAG.len()) {
        let rest = &text[JSON_TAG.len()..];
        if tag.eq_ignore_ascii_case(JSON_TAG) && !rest.starts_with(is_tag_char) {
            return rest;
        }
    }

    let tag_end = text.find(|c: char| !is_tag_char(c)).unwrap_or(text.len());
    let (tag, rest) = text.split_at(tag_end);

    // A bare JSON literal such as `null` or `42` is payload, not a tag
    if !tag.is_empty() && serde_json::from_str::<Value>(tag).is_ok() {
        return text;
    }

    match rest.chars().next() {
        None => rest,
        Some(c) if c.is_whitespace() || c == '{' || c == '[' => rest,
        // Not a tag, e.g. ```true```
        Some(_) => text,
    }
}
