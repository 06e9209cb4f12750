//! Container map configuration
//!
//! A container map is a YAML mapping of container names to container
//! settings. Every setting is written in shorthand and normalized on load:
//!
//! ```yaml
//! web:
//!   image: nginx
//!   uses: [static, {certs: ro}]
//!   binds:
//!     /var/log/nginx: [/srv/logs, rw]
//!   links: [app]
//!   exposes:
//!     - [80, 8080]
//!     - [443, [8443, eth0]]
//! app:
//!   image: !env APP_IMAGE
//!   shares: /var/lib/app/static
//! ```

use serde::Serialize;
use std::path::Path;

use crate::batch::{to_host_volumes, to_ident_list, to_links, to_port_bindings, to_volumes};
use crate::error::{Error, Result};
use crate::lazy::TagRegistry;
use crate::records::{ContainerLink, Ident, PortBinding, SharedVolume};
use crate::value::Value;

/// File looked up when loading from a directory
pub const DEFAULT_FILE: &str = "containers.yaml";

/// Normalized settings of one container
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerConfig {
    /// Container name
    pub name: String,

    /// Image to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Ident>,

    /// Container paths offered to other containers as volumes
    pub shares: Vec<Ident>,

    /// Volumes used from other containers
    pub uses: Vec<SharedVolume>,

    /// Host paths bound into the container
    pub binds: Vec<SharedVolume>,

    /// Links to other containers
    pub links: Vec<ContainerLink>,

    /// Volume containers attached to this one
    pub attaches: Vec<Ident>,

    /// Exposed and published ports
    pub exposes: Vec<PortBinding>,
}

impl ContainerConfig {
    /// Normalize the settings of container `name`
    pub fn from_value(name: &str, body: &Value) -> Result<Self> {
        let entries: &[(Value, Value)] = match body {
            Value::Map(entries) => entries.as_slice(),
            Value::Null => &[],
            other => {
                return Err(Error::ConfigInvalid {
                    message: format!(
                        "container '{}' must be a mapping, found {}",
                        name,
                        other.type_name()
                    ),
                });
            }
        };

        let mut config = Self {
            name: name.to_string(),
            ..Self::default()
        };

        for (key, value) in entries {
            let Some(field) = key.as_str() else {
                return Err(Error::ConfigInvalid {
                    message: format!(
                        "keys in container '{}' must be strings, found {}",
                        name,
                        key.type_name()
                    ),
                });
            };

            match field {
                "image" => {
                    config.image =
                        Ident::optional("image", value).map_err(field_error(name, "image"))?;
                }
                "shares" => {
                    config.shares = to_ident_list(value).map_err(field_error(name, "shares"))?;
                }
                "uses" => config.uses = to_volumes(value).map_err(field_error(name, "uses"))?,
                "binds" => {
                    config.binds = to_host_volumes(value).map_err(field_error(name, "binds"))?;
                }
                "links" => config.links = to_links(value).map_err(field_error(name, "links"))?,
                "attaches" => {
                    config.attaches =
                        to_ident_list(value).map_err(field_error(name, "attaches"))?;
                }
                "exposes" => {
                    config.exposes =
                        to_port_bindings(value).map_err(field_error(name, "exposes"))?;
                }
                other => {
                    return Err(Error::ConfigInvalid {
                        message: format!("unknown key '{}' in container '{}'", other, name),
                    });
                }
            }
        }

        Ok(config)
    }
}

fn field_error<'a>(
    container: &'a str,
    field: &'static str,
) -> impl FnOnce(Error) -> Error + 'a {
    move |source| Error::InvalidContainer {
        container: container.to_string(),
        field,
        source: Box::new(source),
    }
}

/// All containers of a configuration file, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerMap {
    /// Normalized containers
    pub containers: Vec<ContainerConfig>,
}

impl ContainerMap {
    /// Load a container map from a directory or file
    ///
    /// # Arguments
    ///
    /// * `path` - Project directory (containing `containers.yaml`) or a YAML file
    /// * `registry` - Tags read as resolvable placeholders
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let registry = TagRegistry::new().with_tag("env");
    /// let map = ContainerMap::load("./deploy", &registry)?;
    /// for container in &map.containers {
    ///     println!("{}: {} port(s)", container.name, container.exposes.len());
    /// }
    /// ```
    pub fn load<P: AsRef<Path>>(path: P, registry: &TagRegistry) -> Result<Self> {
        let path = path.as_ref();
        let config_path = if path.is_dir() {
            path.join(DEFAULT_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        tracing::debug!("Loading container map from {}", config_path.display());
        let contents = std::fs::read_to_string(&config_path)?;
        Self::from_yaml_str(&contents, registry)
    }

    /// Parse and normalize a YAML document
    pub fn from_yaml_str(yaml: &str, registry: &TagRegistry) -> Result<Self> {
        let root = Value::from_yaml_str(yaml, registry)?;
        Self::from_value(&root)
    }

    /// Normalize a mapping of container names to settings
    pub fn from_value(root: &Value) -> Result<Self> {
        let entries: &[(Value, Value)] = match root {
            Value::Map(entries) => entries.as_slice(),
            Value::Null => &[],
            other => {
                return Err(Error::ConfigInvalid {
                    message: format!(
                        "expected a mapping of container names, found {}",
                        other.type_name()
                    ),
                });
            }
        };

        let containers = entries
            .iter()
            .map(|(key, body)| {
                let name = key.as_str().ok_or_else(|| Error::ConfigInvalid {
                    message: format!("container names must be strings, found {}", key.type_name()),
                })?;
                ContainerConfig::from_value(name, body)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = containers.len(), "Normalized container map");
        Ok(Self { containers })
    }

    /// Look up a container by name
    pub fn get(&self, name: &str) -> Option<&ContainerConfig> {
        self.containers.iter().find(|c| c.name == name)
    }

    /// Container names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.containers.iter().map(|c| c.name.as_str())
    }
}
