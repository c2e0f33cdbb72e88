// src/config/defaults.rs
use crate::config::app::{Features, Keys, Paths};

pub const DEFAULT_CONFIG_PATH: &str = "pseudokey-config.toml";
pub const DEFAULT_KEY_DB_PATH: &str = "data/keys.db";
pub const DEFAULT_KEY_DB_KEY: &str = "dev-key-db-password-2025";

pub fn default_keys() -> Keys {
    Keys {
        key_db_key: DEFAULT_KEY_DB_KEY.into(),
    }
}

pub fn default_paths() -> Paths {
    Paths {
        key_db: DEFAULT_KEY_DB_PATH.into(),
        credentials: "config/credentials.toml".into(),
    }
}

pub fn default_features() -> Features {
    Features {
        use_dev_keys: true,
    }
}
