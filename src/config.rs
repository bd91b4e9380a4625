use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

const CONFIG_DIR: &str = "graphcool";
const CONFIG_FILE: &str = "credentials.json";

pub const DEFAULT_ENDPOINT: &str = "https://api.graph.cool/system";
pub const TOKEN_ENV: &str = "GRAPHCOOL_TOKEN";
pub const ENDPOINT_ENV: &str = "GRAPHCOOL_ENDPOINT";

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct Config {
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Config {
    /// Token from the environment, falling back to the stored one.
    pub fn auth_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.token.clone())
    }

    pub fn system_endpoint(&self) -> String {
        std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|e| !e.is_empty())
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not find config directory")?
        .join(CONFIG_DIR);

    fs::create_dir_all(&config_dir)?;

    Ok(config_dir.join(CONFIG_FILE))
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&get_config_path()?, config)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content).context("Failed to write config file")
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).context("Failed to read config file")?;
    serde_json::from_str(&content).context("Failed to parse config file")
}

/// Expand `~` and `$VAR` in a user-supplied path.
pub fn expand_path(path: &str) -> Result<String> {
    shellexpand::full(path)
        .map(|p| p.into_owned())
        .with_context(|| format!("Could not expand path {}", path))
}
