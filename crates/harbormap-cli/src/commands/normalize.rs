//! Normalize command: print canonical records as JSON

use anyhow::{Result, bail};
use harbormap_core::TagRegistry;

/// Run the normalize command
pub async fn run(config_path: &str, container: Option<&str>, registry: &TagRegistry) -> Result<()> {
    let map = super::load_map(config_path, registry)?;

    let output = match container {
        Some(name) => {
            let Some(config) = map.get(name) else {
                bail!("Container '{}' not found in {}", name, config_path);
            };
            serde_json::to_string_pretty(config)?
        }
        None => serde_json::to_string_pretty(&map)?,
    };

    println!("{output}");
    Ok(())
}
