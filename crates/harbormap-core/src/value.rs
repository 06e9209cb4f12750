//! Loosely-structured input values
//!
//! [`Value`] is what users write in configuration: scalars, lists, mappings,
//! resolvable placeholders, or records that are already canonical. Mappings
//! keep their entries in the order they were written.

use crate::error::{Error, Result};
use crate::lazy::{Deferred, LazyValue, TagRegistry};
use crate::records::{ContainerLink, PortBinding, SharedVolume};

/// A configuration value before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// String
    String(String),
    /// List or tuple
    Seq(Vec<Value>),
    /// Mapping, in insertion order
    Map(Vec<(Value, Value)>),
    /// Resolvable placeholder
    Lazy(LazyValue),
    /// Already-canonical shared volume
    Volume(SharedVolume),
    /// Already-canonical container link
    Link(ContainerLink),
    /// Already-canonical port binding
    Port(PortBinding),
}

impl Value {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Seq(_) => "list",
            Self::Map(_) => "mapping",
            Self::Lazy(_) => "resolvable value",
            Self::Volume(_) => "SharedVolume",
            Self::Link(_) => "ContainerLink",
            Self::Port(_) => "PortBinding",
        }
    }

    /// Truthiness: null, `false`, zero, and empty strings or collections are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Seq(items) => !items.is_empty(),
            Self::Map(entries) => !entries.is_empty(),
            Self::Lazy(_) | Self::Volume(_) | Self::Link(_) | Self::Port(_) => true,
        }
    }

    /// String contents, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a YAML node; tags in `registry` become placeholders
    pub fn from_yaml(yaml: serde_yaml::Value, registry: &TagRegistry) -> Result<Self> {
        use serde_yaml::Value as Yaml;

        Ok(match yaml {
            Yaml::Null => Self::Null,
            Yaml::Bool(b) => Self::Bool(b),
            Yaml::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None if n.is_f64() => Self::Float(n.as_f64().unwrap_or_default()),
                None => {
                    return Err(Error::IntegerOutOfRange {
                        value: n.to_string(),
                    });
                }
            },
            Yaml::String(s) => Self::String(s),
            Yaml::Sequence(items) => Self::Seq(
                items
                    .into_iter()
                    .map(|item| Self::from_yaml(item, registry))
                    .collect::<Result<_>>()?,
            ),
            Yaml::Mapping(mapping) => Self::Map(
                mapping
                    .into_iter()
                    .map(|(k, v)| -> Result<(Value, Value)> {
                        Ok((Self::from_yaml(k, registry)?, Self::from_yaml(v, registry)?))
                    })
                    .collect::<Result<_>>()?,
            ),
            Yaml::Tagged(tagged) => {
                let tag = tagged.tag.to_string();
                let tag = tag.trim_start_matches('!');
                if !registry.contains(tag) {
                    return Err(Error::UnknownTag {
                        tag: tag.to_string(),
                    });
                }
                tracing::trace!(tag, "read resolvable placeholder");
                Self::Lazy(LazyValue::new(Deferred {
                    tag: tag.to_string(),
                    value: tagged.value,
                }))
            }
        })
    }

    /// Parse a YAML document into a value
    pub fn from_yaml_str(yaml: &str, registry: &TagRegistry) -> Result<Self> {
        let node: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::from_yaml(node, registry)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Seq(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<LazyValue> for Value {
    fn from(lazy: LazyValue) -> Self {
        Self::Lazy(lazy)
    }
}

impl From<SharedVolume> for Value {
    fn from(volume: SharedVolume) -> Self {
        Self::Volume(volume)
    }
}

impl From<ContainerLink> for Value {
    fn from(link: ContainerLink) -> Self {
        Self::Link(link)
    }
}

impl From<PortBinding> for Value {
    fn from(binding: PortBinding) -> Self {
        Self::Port(binding)
    }
}
