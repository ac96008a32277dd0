use indexmap::IndexMap;
use serde::Serialize;

/// A literal argument value in a query document.
///
/// Values form a tree: lists and objects recursively contain further
/// values. Numbers are always finite 64-bit floats (the grammar rejects
/// anything that would decode to a NaN or infinity). Bare words other
/// than `true`/`false`/`null` are carried through verbatim as opaque
/// enum-style strings, so resolvers can accept `sortOrder: DESC` without
/// this crate knowing any enum definitions.
///
/// Serializes untagged: a `Value` tree renders as the JSON-shaped data
/// it describes, which is what resolver payloads and job records expect.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `true` or `false`.
    Boolean(bool),

    /// `[ ... ]`, ordered.
    List(Vec<Value>),

    /// `null`.
    Null,

    /// A finite number literal.
    Number(f64),

    /// `{ name: value, ... }`, keys unique, insertion order preserved,
    /// last write wins.
    Object(IndexMap<String, Value>),

    /// A quoted string, a block string, or an enum-style bare word.
    String(String),
}

impl Value {
    /// Returns the string content if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value if this is a `Number` value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a `Boolean` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the items if this is a `List` value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields if this is an `Object` value.
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns `true` if this is the `null` literal.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
