//! Attributes as written
//!
//! Names and values are kept as values so that either side can come from a slot.
//! Literal names and values are [`Value::Str`]; a bare name inside an attribute
//! wrapper (`input(checked)`) has the value `Value::Bool(true)`.

use crate::slim::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute<N> {
    Pair { name: Value<N>, value: Value<N> },
    /// `*${map}`: expands to one pair per entry of the map, in place
    Splat(Value<N>),
}

impl<N> Attribute<N> {
    pub fn pair(name: impl Into<Value<N>>, value: impl Into<Value<N>>) -> Self {
        Attribute::Pair {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The literal name, if this is a pair whose name is not a slot
    pub fn literal_name(&self) -> Option<&str> {
        match self {
            Attribute::Pair { name, .. } => name.as_str(),
            Attribute::Splat(_) => None,
        }
    }
}
