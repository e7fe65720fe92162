//! Print (and optionally save) the resolved configuration.

use std::path::PathBuf;

use floatfx_common::config::{config_file_path, AppConfig};

pub fn run(config: AppConfig, path: Option<PathBuf>, save: bool) -> anyhow::Result<()> {
    config
        .float
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid options: {e}"))?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    if save {
        let path = path.unwrap_or_else(config_file_path);
        config.save_to(&path)?;
        println!("\nSaved to {}", path.display());
    }

    Ok(())
}
