//! Input module
//!
//! Markup arrives as an alternation of literal text segments and interpolation slots:
//!
//! ```text
//! segment₀ slot₀ segment₁ slot₁ … segmentₙ
//! ```
//!
//! [`Source`] builds that sequence (keeping the alternation invariant), and
//! [`InterpolatedStream`] is the cursor the parser consumes it through. The stream
//! position is a small `Copy` value, so backtracking is a plain assignment.

pub mod source;
pub mod stream;

pub use source::{Source, SourceError};
pub use stream::{InterpolatedStream, Matched, Position};
