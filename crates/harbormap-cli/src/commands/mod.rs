//! CLI command implementations

pub mod normalize;
pub mod validate;

use anyhow::{Context, Result};
use harbormap_core::{ContainerMap, TagRegistry};

/// Load and normalize the container map at `config_path` (file or directory)
pub fn load_map(config_path: &str, registry: &TagRegistry) -> Result<ContainerMap> {
    ContainerMap::load(config_path, registry)
        .with_context(|| format!("Failed to load container map from {}", config_path))
}
