//! Grammar tokens
//!
//! Every pattern is anchored with `^`: the stream only ever matches at its cursor.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

// Whitespace and lines
pub static BLANKS: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*"));
pub static BLANKS_NONEMPTY: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]+"));
pub static SPACES: Lazy<Regex> = Lazy::new(|| compile(r"^\s*"));
pub static OPTIONAL_SPACE: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]?"));
pub static NEWLINE: Lazy<Regex> = Lazy::new(|| compile(r"^\n"));
pub static BLANK_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*\n"));
pub static EMPTY_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*\n?"));
pub static REST_OF_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^[^\n]*"));

// Block indicators
pub static COMMENT_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"^/"));
pub static TEXT_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"^[|']"));
pub static INSTRUCTION_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"^-"));
pub static WORD: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z0-9_]+"));

// Elements
/// Tag names may contain `:` but not end with it; a leading `-` is rejected by the caller
pub static TAG_NAME: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z0-9_:\-]*[A-Za-z0-9_\-]"));
pub static SHORTHAND_OP: Lazy<Regex> = Lazy::new(|| compile(r"^[.#]"));
pub static IDENTIFIER: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z0-9_\-]+"));
pub static SPACER: Lazy<Regex> = Lazy::new(|| compile(r"^[<>]"));
pub static BLOCK_EXPANSION: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*:"));
pub static REF_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*@"));

// Attributes
pub static ATTR_WRAPPER_OPEN: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*([(\[{])"));
pub static SPLAT_INLINE: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]*\*"));
pub static SPLAT_WRAPPED: Lazy<Regex> = Lazy::new(|| compile(r"^\s*\*"));
pub static ATTR_NAME: Lazy<Regex> = Lazy::new(|| compile(r#"^[^\s"'<>=(){}\[\]/]+"#));
pub static DOUBLE_QUOTED_REST: Lazy<Regex> = Lazy::new(|| compile(r#"^([^\n"]*)""#));
pub static SINGLE_QUOTED_REST: Lazy<Regex> = Lazy::new(|| compile(r"^([^\n']*)'"));
pub static UNQUOTED_VALUE: Lazy<Regex> = Lazy::new(|| compile(r#"^[^\s"'<>=/]*"#));

// Control flow
pub static FOR_OF: Lazy<Regex> = Lazy::new(|| compile(r"^[ \t]+of[ \t]*"));
