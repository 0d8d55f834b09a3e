use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use tasklist_core::ClientConfig;

pub const APP_DIR: &str = "tasklist";
const CONFIG_FILE_NAME: &str = "config.toml";

/// `~/.config/tasklist/config.toml` on Linux.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// Picks the backend: `--api-url` (or `TASKLIST_API_URL`), then the config
/// file, then the local default.
pub fn resolve_config(api_url: Option<&str>) -> Result<ClientConfig> {
    if let Some(url) = api_url {
        return ClientConfig::new(url).context("Invalid --api-url");
    }

    if let Some(path) = config_path() {
        if let Some(config) = ClientConfig::from_file(&path)? {
            debug!("Base URL taken from {}", path.display());
            return Ok(config);
        }
    }

    Ok(ClientConfig::default())
}
