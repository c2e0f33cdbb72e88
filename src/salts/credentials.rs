//! TOML credentials file as a salt provider
//!
//! ```toml
//! [pseudonymisation_keys.mbis_primary]
//! salt1 = "..."
//! salt2 = "..."
//! ```
//!
//! Values are wrapped in [`Salt`](crate::aliases::Salt) as soon as they are
//! parsed. The file itself should be protected by the deployment (disk
//! encryption, a secrets mount, ...).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::core::Result;
use crate::salts::provider::{SaltProvider, SaltSet};

#[derive(Deserialize)]
struct CredentialsDoc {
    #[serde(default)]
    pseudonymisation_keys: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Default)]
pub struct CredentialsFile {
    keys: BTreeMap<String, SaltSet>,
}

impl CredentialsFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: CredentialsDoc = toml::from_str(content)?;
        let keys = doc
            .pseudonymisation_keys
            .into_iter()
            .map(|(name, entries)| (name, entries.into_iter().collect::<SaltSet>()))
            .collect();
        Ok(Self { keys })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let file = Self::from_toml_str(&content)?;
        info!(path = %path.as_ref().display(), keys = file.keys.len(), "loaded salt credentials");
        Ok(file)
    }

    /// Load the credentials file named by the global config
    pub fn load() -> Result<Self> {
        Self::from_path(crate::config::load().credentials_path())
    }

    /// Names of every key with an entry, configured or not
    pub fn key_names(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }
}

impl SaltProvider for CredentialsFile {
    fn lookup(&self, name: &str) -> Option<&SaltSet> {
        self.keys.get(name)
    }
}
