//! Resolvable placeholders
//!
//! A resolvable value stands in for something that is only known later, such
//! as an environment variable or the address of a container that has not been
//! started yet. Normalization never looks inside a placeholder: wherever an
//! identifier or port is accepted, a [`LazyValue`] is accepted too and carried
//! into the canonical record unchanged.
//!
//! Placeholder types are owned by whoever resolves them. They only need to
//! implement [`Resolvable`].

use serde::{Serialize, Serializer};
use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Capability implemented by placeholder values.
pub trait Resolvable: Any + fmt::Debug + fmt::Display + Send + Sync {}

/// Shared handle to a placeholder.
///
/// Two handles are equal only if they point at the same placeholder.
#[derive(Clone)]
pub struct LazyValue(Arc<dyn Resolvable>);

impl LazyValue {
    /// Wrap a placeholder
    pub fn new<R: Resolvable>(value: R) -> Self {
        Self(Arc::new(value))
    }

    /// Access the concrete placeholder type, if it is `T`
    pub fn downcast_ref<T: Resolvable>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }
}

impl PartialEq for LazyValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LazyValue {}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LazyValue").field(&self.0).finish()
    }
}

impl fmt::Display for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for LazyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Placeholder read from a registered YAML tag, e.g. `!env HOME`
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    /// Tag name without the leading `!`
    pub tag: String,
    /// The tagged node, unresolved
    pub value: serde_yaml::Value,
}

impl Resolvable for Deferred {}

impl fmt::Display for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            serde_yaml::Value::String(s) => write!(f, "!{} {}", self.tag, s),
            serde_yaml::Value::Number(n) => write!(f, "!{} {}", self.tag, n),
            serde_yaml::Value::Bool(b) => write!(f, "!{} {}", self.tag, b),
            serde_yaml::Value::Null => write!(f, "!{}", self.tag),
            other => match serde_yaml::to_string(other) {
                Ok(s) => write!(f, "!{} {}", self.tag, s.trim_end()),
                Err(_) => write!(f, "!{} {:?}", self.tag, other),
            },
        }
    }
}

/// Set of YAML tags that are read as resolvable placeholders
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: BTreeSet<String>,
}

impl TagRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`TagRegistry::register`]
    pub fn with_tag(mut self, tag: impl AsRef<str>) -> Self {
        self.register(tag);
        self
    }

    /// Register a tag; a leading `!` is ignored
    pub fn register(&mut self, tag: impl AsRef<str>) {
        self.tags.insert(normalize_tag(tag.as_ref()).to_string());
    }

    /// Whether `tag` is registered
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(normalize_tag(tag))
    }

    /// Registered tag names
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

fn normalize_tag(tag: &str) -> &str {
    tag.strip_prefix('!').unwrap_or(tag)
}
