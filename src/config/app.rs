// src/config/app.rs
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::core::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_features")]
    pub features: Features,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Keys {
    pub key_db_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub key_db: String,
    pub credentials: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    pub use_dev_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: default_keys(),
            paths: default_paths(),
            features: default_features(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Path of the key database, `PKV_KEY_DB` wins over the file
    pub fn key_db_path(&self) -> String {
        std::env::var("PKV_KEY_DB").unwrap_or_else(|_| self.paths.key_db.clone())
    }

    /// Path of the credentials file, `PKV_CREDENTIALS` wins over the file
    pub fn credentials_path(&self) -> String {
        std::env::var("PKV_CREDENTIALS").unwrap_or_else(|_| self.paths.credentials.clone())
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once, falling back to defaults if the file is missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var("PKV_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut conf = if Path::new(&config_path).exists() {
            Config::from_path(&config_path).unwrap_or_else(|err| {
                warn!(path = %config_path, %err, "unreadable config, using built-in defaults");
                Config::default()
            })
        } else {
            warn!(path = %config_path, "config not found, using built-in defaults");
            Config::default()
        };

        // Test mode override
        if std::env::var("PKV_TEST_MODE").is_ok() {
            conf.features.use_dev_keys = false;
        }

        conf
    })
}
