//! Host values
//!
//! Everything that enters the markup through an interpolation slot is a [`Value`].
//! The parser never looks inside a value; the evaluator classifies it only at the
//! point where it lands in a node position (text, element base, attribute, ...).
//!
//! `N` is the output node type of the [`TreeBuilder`](crate::slim::builder::TreeBuilder)
//! in use, so that pre-built nodes can be interpolated directly.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A host supplied value
#[derive(Clone)]
pub enum Value<N> {
    /// No value (`null` / `undefined` in the host)
    Absent,
    Bool(bool),
    Number(f64),
    Str(String),
    /// A pre-built output node
    Node(N),
    /// An ordered sequence of values
    List(Vec<Value<N>>),
    /// An ordered key/value collection, used by splat attributes
    Map(Vec<(String, Value<N>)>),
    /// A deferred projection over loop variables and bindings
    Ref(Ref<N>),
    /// Anything else the host wants to hand to its builder (event callbacks, options)
    Opaque(Opaque),
}

impl<N> Value<N> {
    pub fn node(node: N) -> Self {
        Value::Node(node)
    }

    pub fn list<T: Into<Value<N>>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value<N>)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn opaque<T: Any>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness as the host language sees it
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }
}

/// Render a number the way the host prints it: integers without a fraction,
/// `NaN` and `Infinity` spelled out, exponent form below `1e-6` and from `1e21` up.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", n)
    }
}

/// Projection invoked with the values of a [`Ref`]'s names, in order
pub type Projection<N> = Rc<dyn Fn(&[Value<N>]) -> Value<N>>;

/// A deferred projection over named loop variables or `@bindings`.
///
/// Refs are plain data; they are resolved by the evaluation context when the value
/// is needed, and the projection may itself return another `Ref`.
pub struct Ref<N> {
    names: Vec<String>,
    projection: Projection<N>,
}

impl<N> Ref<N> {
    pub fn new<S, F>(names: impl IntoIterator<Item = S>, projection: F) -> Self
    where
        S: Into<String>,
        F: Fn(&[Value<N>]) -> Value<N> + 'static,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            projection: Rc::new(projection),
        }
    }

    /// The value of a single variable, unchanged
    pub fn var(name: impl Into<String>) -> Self
    where
        N: Clone,
    {
        Self::new([name.into()], |args: &[Value<N>]| {
            args.first().cloned().unwrap_or(Value::Absent)
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn project(&self, args: &[Value<N>]) -> Value<N> {
        (self.projection)(args)
    }
}

impl<N> Clone for Ref<N> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            projection: Rc::clone(&self.projection),
        }
    }
}

impl<N> fmt::Debug for Ref<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref").field("names", &self.names).finish()
    }
}

impl<N> PartialEq for Ref<N> {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && Rc::ptr_eq(&self.projection, &other.projection)
    }
}

/// A value only the builder knows how to interpret
#[derive(Clone)]
pub struct Opaque(Rc<dyn Any>);

impl Opaque {
    pub fn new<T: Any>(value: T) -> Self {
        Opaque(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<N: fmt::Debug> fmt::Debug for Value<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("Absent"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Ref(r) => r.fmt(f),
            Value::Opaque(o) => o.fmt(f),
        }
    }
}

impl<N: PartialEq> PartialEq for Value<N> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

/// Compact rendering used by the AST tag format
impl<N> fmt::Display for Value<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("absent"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Node(_) => f.write_str("<node>"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Ref(r) => write!(f, "ref({})", r.names().join(", ")),
            Value::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

impl<N> From<bool> for Value<N> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<N> From<f64> for Value<N> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl<N> From<i32> for Value<N> {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl<N> From<u32> for Value<N> {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl<N> From<i64> for Value<N> {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<N> From<usize> for Value<N> {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl<N> From<&str> for Value<N> {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<N> From<String> for Value<N> {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<N> From<Ref<N>> for Value<N> {
    fn from(r: Ref<N>) -> Self {
        Value::Ref(r)
    }
}

impl<N, T: Into<Value<N>>> From<Vec<T>> for Value<N> {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<N, T: Into<Value<N>>> From<Option<T>> for Value<N> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

/// JSON documents map onto values directly; object key order is preserved.
impl<N> From<serde_json::Value> for Value<N> {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Absent, Value::Number),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(entries) => {
                Value::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
