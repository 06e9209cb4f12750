//! Shape classification
//!
//! Every input is classified exactly once into a [`Shape`]. Converters then
//! match on the shape, so each accepted form is one match arm and anything a
//! converter does not list falls through to an explicit error.

use crate::value::Value;

/// Structural shape of an input value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// Null
    Absent,
    /// String, integer, or resolvable placeholder
    Scalar(&'a Value),
    /// A record that is already canonical
    Canonical(&'a Value),
    /// One-element list
    Single(&'a Value),
    /// Two-element list
    Pair(&'a Value, &'a Value),
    /// Three-element list
    Triple(&'a Value, &'a Value, &'a Value),
    /// List of any other length
    Sequence(&'a [Value]),
    /// Mapping with exactly one entry
    Entry(&'a Value, &'a Value),
    /// Mapping with any other number of entries
    Mapping(&'a [(Value, Value)]),
    /// Booleans and floats
    Unsupported(&'a Value),
}

impl<'a> Shape<'a> {
    /// Classify `value`
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(_) | Value::Int(_) | Value::Lazy(_) => Self::Scalar(value),
            Value::Volume(_) | Value::Link(_) | Value::Port(_) => Self::Canonical(value),
            Value::Seq(items) => match items.as_slice() {
                [v0] => Self::Single(v0),
                [v0, v1] => Self::Pair(v0, v1),
                [v0, v1, v2] => Self::Triple(v0, v1, v2),
                other => Self::Sequence(other),
            },
            Value::Map(entries) => match entries.as_slice() {
                [(k, v)] => Self::Entry(k, v),
                other => Self::Mapping(other),
            },
            Value::Bool(_) | Value::Float(_) => Self::Unsupported(value),
        }
    }

    /// Type name of the classified value
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "null",
            Self::Scalar(v) | Self::Canonical(v) | Self::Unsupported(v) => v.type_name(),
            Self::Single(..) | Self::Pair(..) | Self::Triple(..) | Self::Sequence(_) => "list",
            Self::Entry(..) | Self::Mapping(_) => "mapping",
        }
    }

    /// Number of elements for lists and mappings
    pub fn arity(&self) -> Option<usize> {
        match self {
            Self::Single(_) => Some(1),
            Self::Pair(..) => Some(2),
            Self::Triple(..) => Some(3),
            Self::Sequence(items) => Some(items.len()),
            Self::Entry(..) => Some(1),
            Self::Mapping(entries) => Some(entries.len()),
            Self::Absent | Self::Scalar(_) | Self::Canonical(_) | Self::Unsupported(_) => None,
        }
    }
}
