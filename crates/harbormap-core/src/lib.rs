//! Harbormap Core Library
//!
//! Normalizes shorthand container settings into canonical records:
//! - Shared volumes (aliases or container/host path binds, with access mode)
//! - Container links (container and alias)
//! - Port bindings (exposed port, host port, host interface)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Value    │────▶│    Shape    │────▶│  Converter  │────▶│   Records   │
//! │   (YAML)    │     │  classify   │     │  per kind   │     │  canonical  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use harbormap_core::{PortBinding, TagRegistry, Value, to_port_bindings};
//!
//! let value = Value::from_yaml_str("[80, [443, [8443, eth0]]]", &TagRegistry::new())?;
//! let bindings = to_port_bindings(&value)?;
//! assert_eq!(bindings[0], PortBinding::new(80));
//! assert_eq!(
//!     bindings[1],
//!     PortBinding::new(443).with_host_port(8443).with_interface("eth0")
//! );
//! # Ok::<(), harbormap_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod convert;
pub mod error;
pub mod lazy;
pub mod predicates;
pub mod records;
pub mod shape;
pub mod value;

pub use batch::{convert_all, to_host_volumes, to_links, to_list, to_port_bindings, to_volumes};
pub use config::{ContainerConfig, ContainerMap};
pub use convert::{Converter, to_host_volume, to_link, to_port_binding, to_volume};
pub use error::{Error, Result};
pub use lazy::{LazyValue, Resolvable, TagRegistry};
pub use predicates::{is_path_like, is_read_only};
pub use records::{ContainerLink, Ident, Port, PortBinding, SharedVolume, VolumeRef};
pub use shape::Shape;
pub use value::Value;
