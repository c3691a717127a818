//! Interpolated stream
//!
//! The cursor over a [`Source`]. Pattern consumption only ever looks at the rest
//! of the *current* segment, so a match can never run across a slot. The only way
//! past a slot is [`InterpolatedStream::consume_interpolate`], and only once the
//! current segment has been consumed completely.
//!
//! Segment and slot storage is shared (`Rc`), and the cursor is a [`Position`]
//! value. Cloning a stream, taking a snapshot and restoring it are all O(1),
//! independent of how much input has been consumed.

use std::rc::Rc;

use regex::Regex;

use super::source::Source;

/// Where the stream is: segment index, byte offset within it, and line within it.
///
/// Lines are counted from 1 at the start of each segment; the absolute line is not
/// known across slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub segment: usize,
    pub offset: usize,
    pub line: usize,
}

impl Position {
    fn start() -> Self {
        Self {
            segment: 0,
            offset: 0,
            line: 1,
        }
    }
}

/// Owned capture groups of a successful match. Group 0 is the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    groups: Vec<Option<String>>,
}

impl Matched {
    pub fn as_str(&self) -> &str {
        self.get(0).unwrap_or("")
    }

    pub fn get(&self, n: usize) -> Option<&str> {
        self.groups.get(n).and_then(|g| g.as_deref())
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct InterpolatedStream<V> {
    segments: Rc<[String]>,
    slots: Rc<[V]>,
    position: Position,
}

impl<V> Clone for InterpolatedStream<V> {
    fn clone(&self) -> Self {
        Self {
            segments: Rc::clone(&self.segments),
            slots: Rc::clone(&self.slots),
            position: self.position,
        }
    }
}

impl<V: Clone> InterpolatedStream<V> {
    pub fn new(source: Source<V>) -> Self {
        let (segments, slots) = source.into_parts();
        Self {
            segments: segments.into(),
            slots: slots.into(),
            position: Position::start(),
        }
    }

    /// Unconsumed text of the current segment
    pub fn current_segment(&self) -> &str {
        self.segments
            .get(self.position.segment)
            .map_or("", |s| &s[self.position.offset..])
    }

    /// Match `pattern` at the start of the current segment and advance past it.
    ///
    /// Patterns are expected to be anchored with `^`.
    pub fn consume(&mut self, pattern: &Regex) -> Option<Matched> {
        let matched = self.peek(pattern)?;
        self.advance(matched.as_str());
        Some(matched)
    }

    pub fn consume_matched(&mut self, pattern: &Regex) -> Option<String> {
        self.consume(pattern).map(|m| m.as_str().to_string())
    }

    pub fn consume_captured(&mut self, pattern: &Regex, n: usize) -> Option<String> {
        self.consume(pattern)
            .map(|m| m.get(n).unwrap_or("").to_string())
    }

    pub fn consume_string(&mut self, literal: &str) -> bool {
        if self.current_segment().starts_with(literal) {
            self.advance(literal);
            true
        } else {
            false
        }
    }

    pub fn peek(&self, pattern: &Regex) -> Option<Matched> {
        let captures = pattern.captures(self.current_segment())?;
        let whole = captures.get(0)?;
        debug_assert_eq!(whole.start(), 0, "pattern must be anchored: {pattern}");
        if whole.start() != 0 {
            return None;
        }
        Some(Matched {
            groups: captures
                .iter()
                .map(|g| g.map(|g| g.as_str().to_string()))
                .collect(),
        })
    }

    /// Like [`peek`](Self::peek), but only when the match reaches the true end of input
    pub fn peek_to_eof(&self, pattern: &Regex) -> Option<Matched> {
        let matched = self.peek(pattern)?;
        (matched.len() == self.current_segment().len() && self.is_last_segment())
            .then_some(matched)
    }

    pub fn peek_string(&self, literal: &str) -> bool {
        self.current_segment().starts_with(literal)
    }

    /// Take the next slot value. Succeeds only when the current segment is
    /// exhausted and a slot follows it; otherwise the stream is untouched.
    pub fn consume_interpolate(&mut self) -> Option<V> {
        if !self.segment_finished() {
            return None;
        }
        let value = self.slots.get(self.position.segment)?.clone();
        self.position = Position {
            segment: self.position.segment + 1,
            offset: 0,
            line: 1,
        };
        Some(value)
    }

    pub fn ignore_interpolate(&mut self) {
        self.consume_interpolate();
    }

    pub fn segment_finished(&self) -> bool {
        self.current_segment().is_empty()
    }

    pub fn is_eof(&self) -> bool {
        self.segment_finished() && self.is_last_segment()
    }

    pub fn remaining_slots(&self) -> usize {
        self.slots.len().saturating_sub(self.position.segment)
    }

    pub fn segment_index(&self) -> usize {
        self.position.segment
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn snapshot(&self) -> Position {
        self.position
    }

    pub fn restore(&mut self, position: Position) {
        self.position = position;
    }

    /// Run `f` and keep its progress only if it returns `Some`
    pub fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let saved = self.snapshot();
        let result = f(self);
        if result.is_none() {
            self.restore(saved);
        }
        result
    }

    fn is_last_segment(&self) -> bool {
        self.position.segment + 1 >= self.segments.len()
    }

    fn advance(&mut self, consumed: &str) {
        self.position.offset += consumed.len();
        self.position.line += consumed.matches('\n').count();
    }
}

impl<V: Clone> From<Source<V>> for InterpolatedStream<V> {
    fn from(source: Source<V>) -> Self {
        Self::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+").unwrap());
    static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").unwrap());
    static KEY_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)=(\w+)").unwrap());

    fn stream(source: Source<i32>) -> InterpolatedStream<i32> {
        InterpolatedStream::new(source)
    }

    #[test]
    fn test_consume_advances_within_segment() {
        let mut input = stream(Source::from("foo bar"));
        assert_eq!(input.consume_matched(&WORD).as_deref(), Some("foo"));
        assert_eq!(input.current_segment(), " bar");
        assert!(input.consume(&WORD).is_none());
        assert_eq!(input.current_segment(), " bar");
    }

    #[test]
    fn test_consume_captured() {
        let mut input = stream(Source::from("a=b rest"));
        assert_eq!(input.consume_captured(&KEY_VALUE, 2).as_deref(), Some("b"));
        assert_eq!(input.current_segment(), " rest");
    }

    #[test]
    fn test_match_never_crosses_slot() {
        let mut input = stream(Source::new().text("ab").slot(1).text("cd"));
        assert_eq!(input.consume_matched(&WORD).as_deref(), Some("ab"));
        assert!(input.consume(&WORD).is_none());
        assert_eq!(input.consume_interpolate(), Some(1));
        assert_eq!(input.consume_matched(&WORD).as_deref(), Some("cd"));
        assert!(input.is_eof());
    }

    #[test]
    fn test_consume_interpolate_requires_finished_segment() {
        let mut input = stream(Source::new().text("x").slot(7));
        let before = input.snapshot();
        assert_eq!(input.consume_interpolate(), None);
        assert_eq!(input.snapshot(), before);
        assert!(input.consume_string("x"));
        assert_eq!(input.remaining_slots(), 1);
        assert_eq!(input.consume_interpolate(), Some(7));
        assert_eq!(input.remaining_slots(), 0);
        assert_eq!(input.consume_interpolate(), None);
    }

    #[test]
    fn test_peek_to_eof() {
        let input = stream(Source::from("   "));
        assert!(input.peek_to_eof(&SPACES).is_some());

        let input = stream(Source::new().text("  ").slot(1));
        assert!(input.peek(&SPACES).is_some());
        assert!(input.peek_to_eof(&SPACES).is_none());

        let input = stream(Source::from("  x"));
        assert!(input.peek_to_eof(&SPACES).is_none());
    }

    #[test]
    fn test_is_eof() {
        let mut input = stream(Source::new().slot(3));
        assert!(input.segment_finished());
        assert!(!input.is_eof());
        input.ignore_interpolate();
        assert!(input.is_eof());
    }

    #[test]
    fn test_line_counting_resets_at_slot() {
        let mut input = stream(Source::new().text("a\nb\n").slot(1).text("\nc"));
        input.consume(&SPACES);
        assert!(input.consume_string("a\nb\n"));
        assert_eq!(input.line(), 3);
        input.consume_interpolate();
        assert_eq!(input.line(), 1);
        input.consume(&SPACES);
        assert_eq!(input.line(), 2);
        assert_eq!(input.segment_index(), 1);
    }

    #[test]
    fn test_try_parse_commits_or_restores() {
        let mut input = stream(Source::from("foo bar"));
        let failed: Option<()> = input.try_parse(|s| {
            s.consume(&WORD);
            None
        });
        assert!(failed.is_none());
        assert_eq!(input.current_segment(), "foo bar");

        let word = input.try_parse(|s| s.consume_matched(&WORD));
        assert_eq!(word.as_deref(), Some("foo"));
        assert_eq!(input.current_segment(), " bar");
    }

    #[test]
    fn test_clone_shares_storage() {
        let mut input = stream(Source::new().text("foo").slot(1).text("bar"));
        let copy = input.clone();
        input.consume(&WORD);
        assert_eq!(copy.current_segment(), "foo");
        assert_eq!(input.current_segment(), "");
    }
}
