//! Cleanup of model output before it is relayed to the caller.

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Remove a markdown code fence around `raw`.
///
/// Surrounding whitespace is trimmed, then a leading ```` ``` ```` (optionally
/// tagged `json`, any case) and a trailing ```` ``` ```` are removed when they
/// sit at the string boundary, and the result is trimmed again.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = match rest.get(..JSON_TAG.len()) {
            Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => &rest[JSON_TAG.len()..],
            _ => rest,
        };
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}
