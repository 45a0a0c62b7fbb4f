use std::path::Path;

use anyhow::Context;

use crate::model::population::PopulationConfig;

/// Load a `PopulationConfig` from a JSON file. Missing fields fall back to
/// their defaults; the loaded config is validated before being returned.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<PopulationConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let cfg: PopulationConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    cfg.check()?;
    Ok(cfg)
}
