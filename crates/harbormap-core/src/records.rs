//! Canonical records
//!
//! Fixed-shape results of normalization. Records are plain values: they are
//! created fresh by each conversion and compared by content.

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::lazy::LazyValue;
use crate::value::Value;

/// Identifier: volume alias, path, container name, or interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Ident {
    /// Literal name or path
    Name(String),
    /// Placeholder resolved later
    Lazy(LazyValue),
}

impl Ident {
    pub(crate) fn from_value(target: &'static str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Name(s.clone())),
            Value::Lazy(lazy) => Ok(Self::Lazy(lazy.clone())),
            other => Err(Error::invalid_type(
                target,
                "string or resolvable value",
                other.type_name(),
            )),
        }
    }

    pub(crate) fn optional(target: &'static str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            other => Self::from_value(target, other).map(Some),
        }
    }

    /// The literal name, if this is not a placeholder
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Lazy(_) => None,
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<LazyValue> for Ident {
    fn from(lazy: LazyValue) -> Self {
        Self::Lazy(lazy)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Lazy(lazy) => write!(f, "{lazy}"),
        }
    }
}

/// Port number or name; ranges are not checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Port {
    /// Numeric port
    Number(i64),
    /// Port given as a string, e.g. `"8080/udp"`
    Name(String),
    /// Placeholder resolved later
    Lazy(LazyValue),
}

impl Port {
    pub(crate) fn from_value(target: &'static str, value: &Value) -> Result<Self> {
        match value {
            Value::Int(n) => Ok(Self::Number(*n)),
            Value::String(s) => Ok(Self::Name(s.clone())),
            Value::Lazy(lazy) => Ok(Self::Lazy(lazy.clone())),
            other => Err(Error::invalid_type(
                target,
                "integer, string, or resolvable value",
                other.type_name(),
            )),
        }
    }

    pub(crate) fn optional(target: &'static str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            other => Self::from_value(target, other).map(Some),
        }
    }
}

impl From<i64> for Port {
    fn from(port: i64) -> Self {
        Self::Number(port)
    }
}

impl From<i32> for Port {
    fn from(port: i32) -> Self {
        Self::Number(port.into())
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::Number(port.into())
    }
}

impl From<&str> for Port {
    fn from(port: &str) -> Self {
        Self::Name(port.to_string())
    }
}

impl From<LazyValue> for Port {
    fn from(lazy: LazyValue) -> Self {
        Self::Lazy(lazy)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
            Self::Lazy(lazy) => write!(f, "{lazy}"),
        }
    }
}

/// What a shared volume points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VolumeRef {
    /// Volume alias or container path without a host path
    Alias(Ident),
    /// Container path bound to a host path
    Bind {
        /// Path inside the container
        container: Ident,
        /// Path (or alias) on the host
        host: Ident,
    },
}

impl VolumeRef {
    /// Bind `container` to `host`
    pub fn bind(container: impl Into<Ident>, host: impl Into<Ident>) -> Self {
        Self::Bind {
            container: container.into(),
            host: host.into(),
        }
    }
}

impl From<Ident> for VolumeRef {
    fn from(alias: Ident) -> Self {
        Self::Alias(alias)
    }
}

impl From<&str> for VolumeRef {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.into())
    }
}

impl From<String> for VolumeRef {
    fn from(alias: String) -> Self {
        Self::Alias(alias.into())
    }
}

impl From<LazyValue> for VolumeRef {
    fn from(alias: LazyValue) -> Self {
        Self::Alias(alias.into())
    }
}

impl fmt::Display for VolumeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias(alias) => write!(f, "{alias}"),
            Self::Bind { container, host } => write!(f, "{host}:{container}"),
        }
    }
}

/// Volume shared with a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedVolume {
    /// Alias or container/host pair
    pub volume: VolumeRef,
    /// Mounted read-only
    pub readonly: bool,
}

impl SharedVolume {
    /// Create a shared volume record
    pub fn new(volume: impl Into<VolumeRef>, readonly: bool) -> Self {
        Self {
            volume: volume.into(),
            readonly,
        }
    }
}

impl fmt::Display for SharedVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.readonly { "ro" } else { "rw" };
        write!(f, "{}:{}", self.volume, mode)
    }
}

/// Link to another container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerLink {
    /// Linked container
    pub container: Ident,
    /// Name the link is known by inside the container
    pub alias: Ident,
}

impl ContainerLink {
    /// Create a link record
    pub fn new(container: impl Into<Ident>, alias: impl Into<Ident>) -> Self {
        Self {
            container: container.into(),
            alias: alias.into(),
        }
    }
}

impl fmt::Display for ContainerLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.container, self.alias)
    }
}

/// Exposed port, optionally published on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortBinding {
    /// Port exposed by the container
    pub exposed_port: Port,
    /// Host port the exposed port is published on
    pub host_port: Option<Port>,
    /// Host interface to publish on; all interfaces if absent
    pub interface: Option<Ident>,
}

impl PortBinding {
    /// Exposed port only
    pub fn new(exposed_port: impl Into<Port>) -> Self {
        Self {
            exposed_port: exposed_port.into(),
            host_port: None,
            interface: None,
        }
    }

    /// Publish on `host_port`
    pub fn with_host_port(mut self, host_port: impl Into<Port>) -> Self {
        self.host_port = Some(host_port.into());
        self
    }

    /// Restrict publishing to `interface`
    pub fn with_interface(mut self, interface: impl Into<Ident>) -> Self {
        self.interface = Some(interface.into());
        self
    }
}

impl fmt::Display for PortBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(interface) = &self.interface {
            write!(f, "{interface}:")?;
        }
        if let Some(host_port) = &self.host_port {
            write!(f, "{host_port}:")?;
        }
        write!(f, "{}", self.exposed_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_records() {
        assert_eq!(SharedVolume::new("data", true).to_string(), "data:ro");
        assert_eq!(
            SharedVolume::new(VolumeRef::bind("/var/lib/app", "/srv/app"), false).to_string(),
            "/srv/app:/var/lib/app:rw"
        );
        assert_eq!(ContainerLink::new("db", "database").to_string(), "db:database");
        assert_eq!(PortBinding::new(80).to_string(), "80");
        assert_eq!(
            PortBinding::new(80)
                .with_host_port(8080)
                .with_interface("eth0")
                .to_string(),
            "eth0:8080:80"
        );
    }

    #[test]
    fn test_serialize_records() {
        let volume = SharedVolume::new(VolumeRef::bind("/data", "/srv/data"), true);
        let json = serde_json::to_value(&volume).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "volume": {"container": "/data", "host": "/srv/data"},
                "readonly": true
            })
        );

        let binding = PortBinding::new(80).with_host_port("8080");
        let json = serde_json::to_value(&binding).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"exposed_port": 80, "host_port": "8080", "interface": null})
        );
    }

    #[test]
    fn test_ident_rejects_numbers() {
        let err = Ident::from_value("container link", &Value::Int(3)).unwrap_err();
        assert!(err.to_string().contains("found int"));
    }

    #[test]
    fn test_optional_port_accepts_null() {
        assert_eq!(Port::optional("host port", &Value::Null).unwrap(), None);
        assert_eq!(
            Port::optional("host port", &Value::Int(8080)).unwrap(),
            Some(Port::Number(8080))
        );
    }
}
