//! Validate configuration command

use anyhow::Result;
use harbormap_core::TagRegistry;

/// Run the validate command
pub async fn run(config_path: &str, registry: &TagRegistry) -> Result<()> {
    tracing::info!("Validating container map: {}", config_path);

    let map = super::load_map(config_path, registry)?;

    for container in &map.containers {
        tracing::info!(
            "✓ {}: {} volume(s), {} bind(s), {} link(s), {} port(s)",
            container.name,
            container.uses.len(),
            container.binds.len(),
            container.links.len(),
            container.exposes.len()
        );
    }

    tracing::info!("✓ {} container(s) valid", map.containers.len());
    Ok(())
}
