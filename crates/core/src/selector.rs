// ABOUTME: Selector kinds and their compilation into extraction regexes.
// ABOUTME: Patterns are non-recursive and only reliable on flat, shallow markup.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::ScrapeError;

/// Optional quoted-reply block directly inside the matched element.
const QUOTE_PREFIX: &str = "(?:<blockquote.*?>.*?</blockquote>)?";

/// Which part of the markup a selector value names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Class,
    Id,
    Tag,
}

impl SelectorKind {
    /// Parse a menu choice. Accepts `1`-`3` or the kind's name.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "class" => Some(SelectorKind::Class),
            "2" | "id" => Some(SelectorKind::Id),
            "3" | "tag" => Some(SelectorKind::Tag),
            _ => None,
        }
    }

    /// Menu tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            SelectorKind::Class => "1",
            SelectorKind::Id => "2",
            SelectorKind::Tag => "3",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectorKind::Class => "class",
            SelectorKind::Id => "id",
            SelectorKind::Tag => "tag",
        };
        write!(f, "{}", s)
    }
}

/// A selector kind with the value the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSpec {
    pub kind: SelectorKind,
    pub value: String,
}

impl SelectorSpec {
    pub fn new(kind: SelectorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Pattern source for this selector.
    pub fn pattern(&self) -> String {
        pattern_for(self.kind.tag(), &self.value)
    }

    /// Compile the pattern with `.` matching newlines.
    pub fn compile(&self) -> Result<Regex, ScrapeError> {
        RegexBuilder::new(&self.pattern())
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| {
                ScrapeError::unexpected(
                    self.value.clone(),
                    "CompileSelector",
                    Some(anyhow::Error::new(e)),
                )
            })
    }
}

/// Build the extraction pattern for a menu tag and selector value.
///
/// Returns an empty string for an unknown tag. Capture group 1 holds the
/// element's inner content, including a leading quoted-reply block. The
/// match ends at the first closing tag of the same name, so nested
/// same-name children cut the capture short. `value` is regex-escaped and
/// matched literally, so `post.text` never matches `postXtext`.
pub fn pattern_for(kind_tag: &str, value: &str) -> String {
    let value = regex::escape(value);
    match kind_tag {
        "1" => format!(r#"<div class="{value}".*?>({QUOTE_PREFIX}.*?)</div>"#),
        "2" => format!(r#"<div id="{value}".*?>({QUOTE_PREFIX}.*?)</div>"#),
        "3" => format!(r#"<{value}.*?>({QUOTE_PREFIX}.*?)</{value}>"#),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_tags_produce_patterns() {
        for tag in ["1", "2", "3"] {
            assert!(!pattern_for(tag, "post").is_empty(), "tag {}", tag);
        }
    }

    #[test]
    fn unknown_tags_produce_empty_pattern() {
        for tag in ["", "0", "4", "class", "x", " 1"] {
            assert_eq!(pattern_for(tag, "post"), "");
        }
    }

    #[test]
    fn class_pattern_shape() {
        assert_eq!(
            pattern_for("1", "post"),
            r#"<div class="post".*?>((?:<blockquote.*?>.*?</blockquote>)?.*?)</div>"#
        );
    }

    #[test]
    fn tag_pattern_closes_with_same_name() {
        assert_eq!(
            pattern_for("3", "article"),
            r#"<article.*?>((?:<blockquote.*?>.*?</blockquote>)?.*?)</article>"#
        );
    }

    #[test]
    fn value_is_matched_literally() {
        let spec = SelectorSpec::new(SelectorKind::Class, "post.text");
        let re = spec.compile().unwrap();
        assert!(re.is_match(r#"<div class="post.text">x</div>"#));
        assert!(!re.is_match(r#"<div class="postXtext">x</div>"#));
    }

    #[test]
    fn metacharacters_in_value_still_compile() {
        for value in ["a(b", "x[", "c++", "a|b", "{1}"] {
            let spec = SelectorSpec::new(SelectorKind::Tag, value);
            assert!(spec.compile().is_ok(), "value {:?}", value);
        }
        let re = SelectorSpec::new(SelectorKind::Id, "a|b").compile().unwrap();
        assert!(re.is_match(r#"<div id="a|b">x</div>"#));
        assert!(!re.is_match(r#"<div id="a">x</div>"#));
    }

    #[test]
    fn every_menu_kind_has_a_pattern() {
        for choice in ["1", "2", "3", "class", "id", "tag"] {
            let kind = SelectorKind::from_choice(choice).unwrap();
            let spec = SelectorSpec::new(kind, "x");
            assert!(!spec.pattern().is_empty(), "choice {}", choice);
        }
    }

    #[test]
    fn from_choice_accepts_numbers_and_names() {
        assert_eq!(SelectorKind::from_choice("1"), Some(SelectorKind::Class));
        assert_eq!(SelectorKind::from_choice(" 2 "), Some(SelectorKind::Id));
        assert_eq!(SelectorKind::from_choice("TAG"), Some(SelectorKind::Tag));
        assert_eq!(SelectorKind::from_choice("4"), None);
        assert_eq!(SelectorKind::from_choice(""), None);
    }

    #[test]
    fn compiled_pattern_spans_newlines() {
        let spec = SelectorSpec::new(SelectorKind::Id, "main");
        let re = spec.compile().unwrap();
        let caps = re
            .captures("<div id=\"main\">\nline one\nline two\n</div>")
            .unwrap();
        assert_eq!(&caps[1], "\nline one\nline two\n");
    }
}
