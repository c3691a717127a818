//! Evaluation module
//!
//! Walks a parsed [`Document`](crate::slim::ast::Document) against a
//! [`TreeBuilder`](crate::slim::builder::TreeBuilder), resolving slot values and
//! loop variables on the way, and collects `@name` bindings.
//!
//! ```rust,ignore
//! let document = parse(source)?;
//! let evaluation = document.evaluate(&mut dom, &EvaluateOptions::default())?;
//! let list = evaluation.binding("list");
//! ```
//!
//! Each call to `evaluate` owns a fresh [`EvaluationContext`]; nothing is cached
//! between calls, and an error aborts the whole evaluation.

pub mod bindings;
pub mod context;
pub mod error;
mod evaluator;
pub mod options;
pub mod result;

pub use bindings::Bindings;
pub use context::EvaluationContext;
pub use error::EvaluationError;
pub use options::EvaluateOptions;
pub use result::Evaluation;
