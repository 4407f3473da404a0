// citrate/cli/src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain id for requests that do not carry one.
    pub chain_id: u64,
    /// Sign legacy transactions with EIP-155 replay protection.
    pub replay_protection: bool,
    /// Environment variable holding the hex private key.
    pub key_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain_id: 1337,
            replay_protection: true,
            key_env: "CITRATE_PRIVATE_KEY".to_string(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&Path>, chain_id_override: Option<u64>) -> Result<Self> {
        let config_path = config_path
            .map(PathBuf::from)
            .or_else(Self::default_config_path)
            .context("Unable to determine config path")?;

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))?
        } else {
            Self::default()
        };

        if let Some(chain_id) = chain_id_override {
            config.chain_id = chain_id;
        }

        Ok(config)
    }

    pub fn save(&self, config_path: Option<&Path>) -> Result<()> {
        let config_path = config_path
            .map(PathBuf::from)
            .or_else(Self::default_config_path)
            .context("Unable to determine config path")?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Write the default config, refusing to clobber an existing file unless forced.
    pub fn init(config_path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let config_path = config_path
            .map(PathBuf::from)
            .or_else(Self::default_config_path)
            .context("Unable to determine config path")?;

        if config_path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {:?}. Use --force to overwrite",
                config_path
            );
        }

        Self::default().save(Some(&config_path))?;
        Ok(config_path)
    }

    fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".citrate").join("tx-config.json"))
    }
}
