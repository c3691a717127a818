use std::fmt;

/// A structural violation found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
    remaining: String,
    segment: usize,
    line: usize,
}

impl SyntaxError {
    pub fn new(
        message: impl Into<String>,
        remaining: impl Into<String>,
        segment: usize,
        line: usize,
    ) -> Self {
        Self {
            message: message.into(),
            remaining: remaining.into(),
            segment,
            line,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Unconsumed text of the segment the parser stopped in
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    /// 1-based line within [`segment`](Self::segment)
    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (segment {}, line {}): {{{}}}",
            self.message, self.segment, self.line, self.remaining
        )
    }
}

impl std::error::Error for SyntaxError {}
