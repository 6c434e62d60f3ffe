// ABOUTME: Applies a compiled selector pattern to raw markup and cleans each capture.
// ABOUTME: Cleaning rewrites quoted replies as "Author: text", strips tags and collapses whitespace.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static QUOTE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<blockquote.*?><div.*?><cite.*?>(.*?) wrote:</cite>(.*?)</div></blockquote>")
        .unwrap()
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extract the cleaned text of every element `pattern` matches, in document order.
///
/// Captures that clean to nothing are dropped, so an empty vec means no
/// element had any text.
pub fn extract(markup: &str, pattern: &Regex) -> Vec<String> {
    let cleaned: Vec<String> = pattern
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .map(|m| clean_text(m.as_str()))
        .filter(|text| !text.is_empty())
        .collect();

    tracing::debug!(
        matched = count_matches(markup, pattern),
        kept = cleaned.len(),
        "extracted fragments"
    );
    cleaned
}

/// Number of raw matches before cleaning.
pub fn count_matches(markup: &str, pattern: &Regex) -> usize {
    pattern.find_iter(markup).count()
}

/// Turn a markup fragment into flat text.
pub fn clean_text(fragment: &str) -> String {
    let quoted = QUOTE_BLOCK.replace_all(fragment, |caps: &Captures| {
        let quote = TAG.replace_all(&caps[2], "");
        format!("{}: {}", &caps[1], quote.trim())
    });
    let stripped = TAG.replace_all(&quoted, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
