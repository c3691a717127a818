//! Source construction
//!
//! A [`Source`] always holds exactly one more segment than slots. Text is appended
//! to the last segment; every slot opens a new, initially empty, segment.

use std::fmt;

/// Errors raised while assembling a source
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// `from_parts` got segment and slot counts that do not alternate
    MismatchedParts { segments: usize, slots: usize },
    /// A `${` without a closing `}`, at the given byte offset
    UnterminatedPlaceholder(usize),
    /// The resolver did not know this placeholder name
    UnknownPlaceholder(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::MismatchedParts { segments, slots } => write!(
                f,
                "expected one more segment than slots, got {segments} segments and {slots} slots"
            ),
            SourceError::UnterminatedPlaceholder(offset) => {
                write!(f, "unterminated placeholder at offset {offset}")
            }
            SourceError::UnknownPlaceholder(name) => write!(f, "unknown placeholder: {name}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Interleaved literal segments and slot values
#[derive(Debug, Clone, PartialEq)]
pub struct Source<V> {
    segments: Vec<String>,
    slots: Vec<V>,
}

impl<V> Source<V> {
    pub fn new() -> Self {
        Self {
            segments: vec![String::new()],
            slots: Vec::new(),
        }
    }

    /// Append literal text to the current segment
    pub fn text(mut self, text: &str) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.push_str(text);
        }
        self
    }

    /// Append a slot, starting a new segment after it
    pub fn slot(mut self, value: impl Into<V>) -> Self {
        self.slots.push(value.into());
        self.segments.push(String::new());
        self
    }

    pub fn from_parts(segments: Vec<String>, slots: Vec<V>) -> Result<Self, SourceError> {
        if segments.len() != slots.len() + 1 {
            return Err(SourceError::MismatchedParts {
                segments: segments.len(),
                slots: slots.len(),
            });
        }
        Ok(Self { segments, slots })
    }

    /// Split `${name}` placeholders out of `text`, resolving each through `resolve`.
    ///
    /// Names are trimmed before lookup.
    pub fn with_placeholders<F>(text: &str, mut resolve: F) -> Result<Self, SourceError>
    where
        F: FnMut(&str) -> Option<V>,
    {
        let mut source = Self::new();
        let mut rest = text;
        let mut offset = 0;
        while let Some(start) = rest.find("${") {
            let after_open = &rest[start + 2..];
            let end = after_open
                .find('}')
                .ok_or(SourceError::UnterminatedPlaceholder(offset + start))?;
            let name = after_open[..end].trim();
            let value =
                resolve(name).ok_or_else(|| SourceError::UnknownPlaceholder(name.to_string()))?;
            source = source.text(&rest[..start]).slot(value);
            let consumed = start + 2 + end + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }
        Ok(source.text(rest))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn slots(&self) -> &[V] {
        &self.slots
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<V>) {
        (self.segments, self.slots)
    }
}

impl<V> Default for Source<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<&str> for Source<V> {
    fn from(text: &str) -> Self {
        Self::new().text(text)
    }
}

impl<V> From<String> for Source<V> {
    fn from(text: String) -> Self {
        Self {
            segments: vec![text],
            slots: Vec::new(),
        }
    }
}
