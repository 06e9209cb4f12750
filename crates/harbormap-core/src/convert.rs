//! Per-kind converters
//!
//! Each converter turns one shorthand value into a canonical record. The
//! accepted forms are:
//!
//! ```yaml
//! # shared volume: alias, optionally with a read-only indicator
//! - data
//! - [data, ro]
//! - {data: ro}
//!
//! # host volume: alias + flag, or container path + host path (+ flag)
//! - [logs, true]
//! - [/var/log/app, /srv/logs]
//! - [/var/log/app, [/srv/logs, ro]]
//! - [/var/log/app, /srv/logs, ro]
//! - {/var/log/app: [/srv/logs, ro]}
//!
//! # container link: container, optionally with an alias
//! - db
//! - [db, database]
//!
//! # port binding: exposed port, optionally with host port and interface
//! - 80
//! - [80, 8080]
//! - [80, [8080, eth0]]
//! - [80, 8080, eth0]
//! ```
//!
//! A record that is already canonical is returned as is.

use crate::error::{Error, Result};
use crate::predicates::{is_access_marker, is_read_only};
use crate::records::{ContainerLink, Ident, Port, PortBinding, SharedVolume, VolumeRef};
use crate::shape::Shape;
use crate::value::Value;

/// Conversion of one shorthand value into a canonical record
pub trait Converter {
    /// Canonical record produced
    type Output: Clone;

    /// Name used in error messages
    const TARGET: &'static str;

    /// Accepted top-level types when converting a batch
    const BATCH_EXPECTED: &'static str;

    /// The record itself, if `value` is already canonical for this converter
    fn canonical(value: &Value) -> Option<&Self::Output>;

    /// Convert a classified value
    fn convert(shape: Shape<'_>) -> Result<Self::Output>;
}

/// Shared volumes: `alias` or `(alias, read-only indicator)`
#[derive(Debug, Clone, Copy)]
pub struct Volumes;

impl Converter for Volumes {
    type Output = SharedVolume;

    const TARGET: &'static str = "shared volume";
    const BATCH_EXPECTED: &'static str = "SharedVolume, list, tuple, mapping, or string";

    fn canonical(value: &Value) -> Option<&SharedVolume> {
        match value {
            Value::Volume(volume) => Some(volume),
            _ => None,
        }
    }

    fn convert(shape: Shape<'_>) -> Result<SharedVolume> {
        match shape {
            Shape::Canonical(Value::Volume(volume)) => Ok(volume.clone()),
            Shape::Scalar(alias) | Shape::Single(alias) => alias_volume(alias, false),
            Shape::Pair(alias, flag) | Shape::Entry(alias, flag) => {
                alias_volume(alias, is_read_only(flag))
            }
            Shape::Triple(..) | Shape::Sequence(_) => Err(Error::invalid_shape(
                Self::TARGET,
                "1-2",
                shape.arity().unwrap_or_default(),
            )),
            Shape::Mapping(entries) => Err(Error::invalid_shape(
                "shared volume mapping",
                "1",
                entries.len(),
            )),
            other => Err(Error::invalid_type(
                Self::TARGET,
                "list, tuple, mapping, or string",
                other.type_name(),
            )),
        }
    }
}

/// Host-bound volumes
///
/// Two elements are read as `(alias, flag)` when the second one is a boolean,
/// `"ro"`, or `"rw"`, and as `(container path, host path)` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct HostVolumes;

impl Converter for HostVolumes {
    type Output = SharedVolume;

    const TARGET: &'static str = "shared host volume";
    const BATCH_EXPECTED: &'static str = "SharedVolume, list, tuple, mapping, or string";

    fn canonical(value: &Value) -> Option<&SharedVolume> {
        Volumes::canonical(value)
    }

    fn convert(shape: Shape<'_>) -> Result<SharedVolume> {
        match shape {
            Shape::Canonical(Value::Volume(volume)) => Ok(volume.clone()),
            Shape::Scalar(alias) | Shape::Single(alias) => host_volume_single(alias),
            Shape::Pair(v0, v1) => host_volume_pair(v0, v1),
            Shape::Triple(container, host, flag) => host_volume_triple(container, host, flag),
            Shape::Sequence(items) => Err(Error::invalid_shape(Self::TARGET, "1-3", items.len())),
            Shape::Entry(container, Value::Seq(rest)) => host_volume_args(container, rest),
            Shape::Entry(container, value) => host_volume_pair(container, value),
            Shape::Mapping(entries) => Err(Error::invalid_shape(
                "shared host volume mapping",
                "1",
                entries.len(),
            )),
            other => Err(Error::invalid_type(
                Self::TARGET,
                "list, tuple, mapping, or string",
                other.type_name(),
            )),
        }
    }
}

/// Bare alias with read-write access
pub fn host_volume_single(alias: &Value) -> Result<SharedVolume> {
    alias_volume(alias, false)
}

/// Two-element host volume; the second element decides the reading.
///
/// Checked in order:
/// 1. `[host, flag]` list: container path bound to host path with flag
/// 2. one-element list: alias with flag if it holds an access marker,
///    otherwise container path bound to host path
/// 3. access marker: alias with flag
/// 4. anything else: container path bound to host path, read-write
pub fn host_volume_pair(v0: &Value, v1: &Value) -> Result<SharedVolume> {
    match Shape::of(v1) {
        Shape::Pair(host, flag) => bind_volume(v0, host, is_read_only(flag)),
        Shape::Single(nested) if is_access_marker(nested) => {
            tracing::trace!("nested host volume flag read as access marker");
            alias_volume(v0, is_read_only(nested))
        }
        Shape::Single(host) => bind_volume(v0, host, false),
        nested @ (Shape::Triple(..) | Shape::Sequence(_)) => Err(Error::invalid_shape(
            "nested host path",
            "1-2",
            nested.arity().unwrap_or_default(),
        )),
        _ if is_access_marker(v1) => {
            tracing::trace!("host volume pair read as alias with access flag");
            alias_volume(v0, is_read_only(v1))
        }
        _ => bind_volume(v0, v1, false),
    }
}

/// `(container path, host path, flag)`
pub fn host_volume_triple(container: &Value, host: &Value, flag: &Value) -> Result<SharedVolume> {
    bind_volume(container, host, is_read_only(flag))
}

fn host_volume_args(container: &Value, rest: &[Value]) -> Result<SharedVolume> {
    match rest {
        [] => host_volume_single(container),
        [v1] => host_volume_pair(container, v1),
        [host, flag] => host_volume_triple(container, host, flag),
        other => Err(Error::invalid_shape(
            HostVolumes::TARGET,
            "1-3",
            other.len() + 1,
        )),
    }
}

fn alias_volume(alias: &Value, readonly: bool) -> Result<SharedVolume> {
    Ok(SharedVolume::new(Ident::from_value("volume", alias)?, readonly))
}

fn bind_volume(container: &Value, host: &Value, readonly: bool) -> Result<SharedVolume> {
    let volume = VolumeRef::Bind {
        container: Ident::from_value("container path", container)?,
        host: Ident::from_value("host path", host)?,
    };
    Ok(SharedVolume { volume, readonly })
}

/// Container links: `container` or `(container, alias)`
#[derive(Debug, Clone, Copy)]
pub struct Links;

impl Converter for Links {
    type Output = ContainerLink;

    const TARGET: &'static str = "container link";
    const BATCH_EXPECTED: &'static str = "ContainerLink, list, tuple, mapping, or string";

    fn canonical(value: &Value) -> Option<&ContainerLink> {
        match value {
            Value::Link(link) => Some(link),
            _ => None,
        }
    }

    fn convert(shape: Shape<'_>) -> Result<ContainerLink> {
        match shape {
            Shape::Canonical(Value::Link(link)) => Ok(link.clone()),
            Shape::Scalar(container) | Shape::Single(container) => {
                let container = Ident::from_value("linked container", container)?;
                Ok(ContainerLink {
                    alias: container.clone(),
                    container,
                })
            }
            Shape::Pair(container, alias) => Ok(ContainerLink {
                container: Ident::from_value("linked container", container)?,
                alias: Ident::from_value("link alias", alias)?,
            }),
            Shape::Triple(..) | Shape::Sequence(_) => Err(Error::invalid_shape(
                Self::TARGET,
                "1-2",
                shape.arity().unwrap_or_default(),
            )),
            other => Err(Error::invalid_type(
                Self::TARGET,
                "list, tuple, or string",
                other.type_name(),
            )),
        }
    }
}

/// Port bindings: `exposed`, `(exposed, host)`, `(exposed, (host, interface))`,
/// or `(exposed, host, interface)`
#[derive(Debug, Clone, Copy)]
pub struct PortBindings;

impl Converter for PortBindings {
    type Output = PortBinding;

    const TARGET: &'static str = "port binding";
    const BATCH_EXPECTED: &'static str = "PortBinding, list, tuple, mapping, or string";

    fn canonical(value: &Value) -> Option<&PortBinding> {
        match value {
            Value::Port(binding) => Some(binding),
            _ => None,
        }
    }

    fn convert(shape: Shape<'_>) -> Result<PortBinding> {
        match shape {
            Shape::Canonical(Value::Port(binding)) => Ok(binding.clone()),
            Shape::Scalar(exposed) | Shape::Single(exposed) => Ok(PortBinding {
                exposed_port: Port::from_value("exposed port", exposed)?,
                host_port: None,
                interface: None,
            }),
            Shape::Pair(exposed, host_bind) => port_pair(exposed, host_bind),
            Shape::Triple(exposed, host_port, interface) => Ok(PortBinding {
                exposed_port: Port::from_value("exposed port", exposed)?,
                host_port: Port::optional("host port", host_port)?,
                interface: Ident::optional("interface", interface)?,
            }),
            Shape::Sequence(items) => Err(Error::invalid_shape(Self::TARGET, "1-3", items.len())),
            other => Err(Error::invalid_type(
                Self::TARGET,
                "list, tuple, int, or string",
                other.type_name(),
            )),
        }
    }
}

fn port_pair(exposed: &Value, host_bind: &Value) -> Result<PortBinding> {
    let exposed_port = Port::from_value("exposed port", exposed)?;
    match Shape::of(host_bind) {
        Shape::Scalar(_) | Shape::Absent => Ok(PortBinding {
            exposed_port,
            host_port: Port::optional("host port", host_bind)?,
            interface: None,
        }),
        Shape::Pair(host_port, interface) => {
            tracing::trace!("port binding host part read as (host port, interface)");
            Ok(PortBinding {
                exposed_port,
                host_port: Port::optional("host port", host_port)?,
                interface: Ident::optional("interface", interface)?,
            })
        }
        // bools, floats and records count as one element
        other => Err(Error::invalid_shape(
            "port binding host part",
            "2",
            other.arity().unwrap_or(1),
        )),
    }
}

/// Convert to a shared volume
pub fn to_volume(value: &Value) -> Result<SharedVolume> {
    Volumes::convert(Shape::of(value))
}

/// Convert to a host-bound shared volume
pub fn to_host_volume(value: &Value) -> Result<SharedVolume> {
    HostVolumes::convert(Shape::of(value))
}

/// Convert to a container link
pub fn to_link(value: &Value) -> Result<ContainerLink> {
    Links::convert(Shape::of(value))
}

/// Convert to a port binding
pub fn to_port_binding(value: &Value) -> Result<PortBinding> {
    PortBindings::convert(Shape::of(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::{Deferred, LazyValue, TagRegistry};
    use rstest::rstest;

    fn parse(yaml: &str) -> Value {
        Value::from_yaml_str(yaml, &TagRegistry::new().with_tag("env")).unwrap()
    }

    fn bind(container: &str, host: &str, readonly: bool) -> SharedVolume {
        SharedVolume::new(VolumeRef::bind(container, host), readonly)
    }

    fn assert_invalid_shape(err: Error, expected_found: usize) {
        match err {
            Error::InvalidShape { found, .. } => assert_eq!(found, expected_found),
            other => panic!("Expected InvalidShape, got {other:?}"),
        }
    }

    fn assert_invalid_type(err: Error, expected_found: &str) {
        match err {
            Error::InvalidType { found, .. } => assert_eq!(found, expected_found),
            other => panic!("Expected InvalidType, got {other:?}"),
        }
    }

    // =========================================================================
    // Shared volumes
    // =========================================================================

    #[rstest]
    #[case("a", "a", false)]
    #[case("[a]", "a", false)]
    #[case("[a, ro]", "a", true)]
    #[case("[a, rw]", "a", false)]
    #[case("[a, true]", "a", true)]
    #[case("[a, ~]", "a", false)]
    #[case("[a, yes]", "a", true)]
    #[case("{a: ro}", "a", true)]
    #[case("{a: false}", "a", false)]
    fn test_volume(#[case] yaml: &str, #[case] alias: &str, #[case] readonly: bool) {
        assert_eq!(
            to_volume(&parse(yaml)).unwrap(),
            SharedVolume::new(alias, readonly)
        );
    }

    #[rstest]
    #[case("[]", 0)]
    #[case("[a, ro, x]", 3)]
    #[case("{a: ro, b: rw}", 2)]
    #[case("{}", 0)]
    fn test_volume_bad_length(#[case] yaml: &str, #[case] found: usize) {
        assert_invalid_shape(to_volume(&parse(yaml)).unwrap_err(), found);
    }

    #[test]
    fn test_volume_bad_type() {
        assert_invalid_type(to_volume(&parse("true")).unwrap_err(), "bool");
        assert_invalid_type(to_volume(&parse("~")).unwrap_err(), "null");
        assert_invalid_type(to_volume(&parse("[1, ro]")).unwrap_err(), "int");
        let link = Value::from(ContainerLink::new("a", "b"));
        assert_invalid_type(to_volume(&link).unwrap_err(), "ContainerLink");
    }

    #[test]
    fn test_volume_type_error_message() {
        let err = to_volume(&parse("1.5")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("list, tuple, mapping, or string"));
        assert!(message.contains("float"));
    }

    // =========================================================================
    // Host volumes
    // =========================================================================

    #[rstest]
    #[case("logs", SharedVolume::new("logs", false))]
    #[case("[logs]", SharedVolume::new("logs", false))]
    #[case("[c, h]", bind("c", "h", false))]
    #[case("[a, true]", SharedVolume::new("a", true))]
    #[case("[a, false]", SharedVolume::new("a", false))]
    #[case("[a, ro]", SharedVolume::new("a", true))]
    #[case("[a, rw]", SharedVolume::new("a", false))]
    #[case("[c, [h, ro]]", bind("c", "h", true))]
    #[case("[c, [h, rw]]", bind("c", "h", false))]
    #[case("[c, [h]]", bind("c", "h", false))]
    #[case("[a, [ro]]", SharedVolume::new("a", true))]
    #[case("[a, [false]]", SharedVolume::new("a", false))]
    #[case("[c, h, ro]", bind("c", "h", true))]
    #[case("[c, h, ~]", bind("c", "h", false))]
    #[case("[c, ro, ro]", bind("c", "ro", true))]
    #[case("{c: h}", bind("c", "h", false))]
    #[case("{c: ro}", SharedVolume::new("c", true))]
    #[case("{c: [h, ro]}", bind("c", "h", true))]
    #[case("{c: [h]}", bind("c", "h", false))]
    #[case("{c: [ro]}", SharedVolume::new("c", true))]
    #[case("{c: []}", SharedVolume::new("c", false))]
    fn test_host_volume(#[case] yaml: &str, #[case] expected: SharedVolume) {
        assert_eq!(to_host_volume(&parse(yaml)).unwrap(), expected);
    }

    #[rstest]
    #[case("[]", 0)]
    #[case("[a, b, c, d]", 4)]
    #[case("[c, [h, ro, x]]", 3)]
    #[case("[c, []]", 0)]
    #[case("{c: [h, ro, x]}", 4)]
    #[case("{a: b, c: d}", 2)]
    fn test_host_volume_bad_length(#[case] yaml: &str, #[case] found: usize) {
        assert_invalid_shape(to_host_volume(&parse(yaml)).unwrap_err(), found);
    }

    #[test]
    fn test_host_volume_host_path_must_be_identifier() {
        assert_invalid_type(to_host_volume(&parse("[c, 5]")).unwrap_err(), "int");
        assert_invalid_type(to_host_volume(&parse("[c, ~]")).unwrap_err(), "null");
        assert_invalid_type(to_host_volume(&parse("{/data: ~}")).unwrap_err(), "null");
        assert_invalid_type(to_host_volume(&parse("1.0")).unwrap_err(), "float");
    }

    #[test]
    fn test_host_volume_arity_functions() {
        let c = Value::from("/data");
        let h = Value::from("/srv/data");
        assert_eq!(
            host_volume_single(&c).unwrap(),
            SharedVolume::new("/data", false)
        );
        assert_eq!(
            host_volume_pair(&c, &h).unwrap(),
            bind("/data", "/srv/data", false)
        );
        assert_eq!(
            host_volume_pair(&c, &Value::Bool(true)).unwrap(),
            SharedVolume::new("/data", true)
        );
        assert_eq!(
            host_volume_triple(&c, &h, &Value::from("ro")).unwrap(),
            bind("/data", "/srv/data", true)
        );
    }

    #[test]
    fn test_host_volume_placeholder_host_path() {
        let value = parse("[/data, !env DATA_DIR]");
        let volume = to_host_volume(&value).unwrap();
        let VolumeRef::Bind { container, host } = &volume.volume else {
            panic!("Expected bind");
        };
        assert_eq!(container, &Ident::from("/data"));
        let Ident::Lazy(lazy) = host else {
            panic!("Expected placeholder host path");
        };
        assert_eq!(lazy.downcast_ref::<Deferred>().unwrap().tag, "env");
        assert!(!volume.readonly);
    }

    // =========================================================================
    // Container links
    // =========================================================================

    #[rstest]
    #[case("x", ContainerLink::new("x", "x"))]
    #[case("[x]", ContainerLink::new("x", "x"))]
    #[case("[x, y]", ContainerLink::new("x", "y"))]
    fn test_link(#[case] yaml: &str, #[case] expected: ContainerLink) {
        assert_eq!(to_link(&parse(yaml)).unwrap(), expected);
    }

    #[test]
    fn test_link_errors() {
        assert_invalid_shape(to_link(&parse("[]")).unwrap_err(), 0);
        assert_invalid_shape(to_link(&parse("[x, y, z]")).unwrap_err(), 3);
        assert_invalid_type(to_link(&parse("{x: y}")).unwrap_err(), "mapping");
        assert_invalid_type(to_link(&parse("8")).unwrap_err(), "int");
    }

    // =========================================================================
    // Port bindings
    // =========================================================================

    #[rstest]
    #[case("80", PortBinding::new(80))]
    #[case("'80/udp'", PortBinding::new("80/udp"))]
    #[case("[80]", PortBinding::new(80))]
    #[case("[80, 8080]", PortBinding::new(80).with_host_port(8080))]
    #[case("[80, ~]", PortBinding::new(80))]
    #[case(
        "[80, [8080, eth0]]",
        PortBinding::new(80).with_host_port(8080).with_interface("eth0")
    )]
    #[case(
        "[80, 8080, eth0]",
        PortBinding::new(80).with_host_port(8080).with_interface("eth0")
    )]
    #[case("[80, 8080, ~]", PortBinding::new(80).with_host_port(8080))]
    #[case("[80, [~, lo]]", PortBinding::new(80).with_interface("lo"))]
    fn test_port_binding(#[case] yaml: &str, #[case] expected: PortBinding) {
        assert_eq!(to_port_binding(&parse(yaml)).unwrap(), expected);
    }

    #[test]
    fn test_port_binding_errors() {
        assert_invalid_shape(to_port_binding(&parse("[]")).unwrap_err(), 0);
        assert_invalid_shape(to_port_binding(&parse("[1, 2, 3, 4]")).unwrap_err(), 4);
        assert_invalid_shape(to_port_binding(&parse("[80, [8080]]")).unwrap_err(), 1);
        assert_invalid_shape(
            to_port_binding(&parse("[80, [8080, eth0, x]]")).unwrap_err(),
            3,
        );
        assert_invalid_type(to_port_binding(&parse("[[80]]")).unwrap_err(), "list");
        assert_invalid_type(to_port_binding(&parse("{80: 8080}")).unwrap_err(), "mapping");
    }

    #[rstest]
    #[case("[80, true]", 1)]
    #[case("[80, 1.5]", 1)]
    #[case("[80, {a: b}]", 1)]
    #[case("[80, {a: b, c: d}]", 2)]
    fn test_port_binding_bad_host_part(#[case] yaml: &str, #[case] found: usize) {
        match to_port_binding(&parse(yaml)).unwrap_err() {
            Error::InvalidShape { target, found: actual, .. } => {
                assert_eq!(target, "port binding host part");
                assert_eq!(actual, found);
            }
            other => panic!("Expected InvalidShape, got {other:?}"),
        }
    }

    #[test]
    fn test_port_binding_placeholder_host_port() {
        let lazy = LazyValue::new(Deferred {
            tag: "env".to_string(),
            value: serde_yaml::Value::String("HOST_PORT".into()),
        });
        let value = Value::Seq(vec![Value::Int(80), Value::Lazy(lazy.clone())]);
        assert_eq!(
            to_port_binding(&value).unwrap(),
            PortBinding::new(80).with_host_port(lazy)
        );
    }

    // =========================================================================
    // Canonical records pass through
    // =========================================================================

    #[test]
    fn test_canonical_records_unchanged() {
        let volume = bind("/data", "/srv/data", true);
        let link = ContainerLink::new("db", "database");
        let binding = PortBinding::new(80).with_host_port(8080).with_interface("eth0");

        assert_eq!(to_volume(&volume.clone().into()).unwrap(), volume);
        assert_eq!(to_host_volume(&volume.clone().into()).unwrap(), volume);
        assert_eq!(to_link(&link.clone().into()).unwrap(), link);
        assert_eq!(to_port_binding(&binding.clone().into()).unwrap(), binding);
    }

    #[test]
    fn test_placeholder_scalar_is_carried() {
        let lazy = LazyValue::new(Deferred {
            tag: "env".to_string(),
            value: serde_yaml::Value::String("APP".into()),
        });
        let value = Value::Lazy(lazy.clone());
        assert_eq!(
            to_link(&value).unwrap(),
            ContainerLink::new(lazy.clone(), lazy.clone())
        );
        assert_eq!(to_volume(&value).unwrap(), SharedVolume::new(lazy.clone(), false));
        assert_eq!(to_port_binding(&value).unwrap(), PortBinding::new(lazy));
    }
}
