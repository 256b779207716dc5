//! Gateway configuration.
//!
//! Resolves the API origin from, in priority order:
//! 1. The `CORTEX_API_URL` environment variable
//! 2. `~/.config/cortex/config.toml`
//! 3. The localhost development default

use cortex_core::error::{CortexError, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const ENV_BASE_URL: &str = "CORTEX_API_URL";

/// Connection settings for the API gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// HTTP origin plus path prefix, no trailing slash (e.g. `https://api.cortex.app/api`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from the environment and config file.
    ///
    /// A missing config file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        if let Ok(url) = env::var(ENV_BASE_URL) {
            return Ok(Self {
                base_url: url.trim_end_matches('/').to_string(),
            });
        }

        let path = config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            CortexError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Returns the path to the configuration file: `~/.config/cortex/config.toml`
fn config_file_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CortexError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("cortex").join("config.toml"))
}
