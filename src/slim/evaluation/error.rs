use std::fmt;

/// A value in a node position that the position cannot take.
///
/// Each variant carries a short description of the offending value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    InvalidTextValue(String),
    InvalidElementBase(String),
    InvalidAttributeName(String),
    InvalidAttributeValue { name: String, value: String },
    InvalidRefName(String),
    /// A splat whose value is not a key/value map
    InvalidSplat(String),
    NotIterable(String),
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::InvalidTextValue(v) => write!(f, "invalid text value: {v}"),
            EvaluationError::InvalidElementBase(v) => write!(f, "invalid element base: {v}"),
            EvaluationError::InvalidAttributeName(v) => write!(f, "invalid attribute name: {v}"),
            EvaluationError::InvalidAttributeValue { name, value } => {
                write!(f, "invalid value for attribute {name}: {value}")
            }
            EvaluationError::InvalidRefName(v) => write!(f, "invalid ref name: {v}"),
            EvaluationError::InvalidSplat(v) => write!(f, "splat value is not a map: {v}"),
            EvaluationError::NotIterable(v) => write!(f, "value is not iterable: {v}"),
        }
    }
}

impl std::error::Error for EvaluationError {}
