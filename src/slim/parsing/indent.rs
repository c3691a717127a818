//! Indentation comparison
//!
//! Indents are runs of blanks and tabs, never normalized. Two indents are ordered
//! only when one is a prefix of the other, so mixing tabs and spaces inconsistently
//! produces [`IndentOrdering::Incomparable`] rather than a guess.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentOrdering {
    Eq,
    /// Left is strictly deeper (the right indent is a proper prefix)
    Gt,
    Lt,
    Incomparable,
}

impl IndentOrdering {
    pub fn reverse(self) -> Self {
        match self {
            IndentOrdering::Gt => IndentOrdering::Lt,
            IndentOrdering::Lt => IndentOrdering::Gt,
            other => other,
        }
    }
}

/// The leading blanks/tabs of `text`
pub fn leading_indent(text: &str) -> &str {
    LEADING_INDENT.find(text).map_or("", |m| m.as_str())
}

/// Compare the leading indents of two strings
pub fn compare_indent(a: &str, b: &str) -> IndentOrdering {
    let a = leading_indent(a);
    let b = leading_indent(b);
    if a == b {
        IndentOrdering::Eq
    } else if a.starts_with(b) {
        IndentOrdering::Gt
    } else if b.starts_with(a) {
        IndentOrdering::Lt
    } else {
        IndentOrdering::Incomparable
    }
}

/// Remove `indent` from the front of `text` as far as the two are comparable
pub fn trim_indent<'a>(text: &'a str, indent: &str) -> &'a str {
    match compare_indent(text, indent) {
        IndentOrdering::Gt | IndentOrdering::Eq => &text[indent.len()..],
        IndentOrdering::Lt => text.trim_start_matches([' ', '\t']),
        IndentOrdering::Incomparable => text,
    }
}
