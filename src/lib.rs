//! # slimtree
//!
//! A compiler for an indentation-sensitive markup language into node trees.
//!
//! Source text is interleaved with host values (interpolation slots), parsed into an
//! AST purely from indentation, and evaluated against a [`TreeBuilder`](slim::builder::TreeBuilder)
//! that produces the actual output nodes.
//!
//! File Layout
//!
//! src/slim
//!   ├── input        Segment/slot stream with snapshot based backtracking
//!   ├── parsing      Recursive-descent indentation parser
//!   ├── ast          Node variants produced by the parser
//!   ├── value        Host values and deferred references
//!   ├── evaluation   Evaluator, context and results
//!   ├── builder      The tree builder interface
//!   ├── dom          Arena tree implementing the builder (tests, cli)
//!   └── formats      Html and AST tag serializers
//!
//! For test helpers, see the [testing module](slim::testing).

pub mod slim;

pub use slim::{parse, render_html, Error};
