// src/lib.rs
//! pseudokey-vault: pseudonymisation key hierarchy
//!
//! Features:
//! - Singular keys with parent lineage and compound keys over two chains
//! - Chain resolution with cycle detection
//! - Structural validation on every insert/update
//! - Salt lookup through a pluggable secret store (zeroized on drop)
//! - SQLCipher-backed key database with atomic cascading deletes

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod db;
pub mod enums;
pub mod error;
pub mod export;
pub mod salts;
pub mod status;

// Re-export everything users need at the crate root
pub use aliases::Salt;
pub use config::load as load_config;
pub use crate::core::{
    validate, ChainResolver, Key, KeyGrant, KeyGraph, KeyId, KeyRegistry, Removal,
    Result as CoreResult,
};
pub use enums::KeyKind;
pub use error::{CoreError, ValidationError};
pub use export::export_to_json;
pub use salts::{
    chain_salts, configured, require_salts, salt, CredentialsFile, MemorySaltProvider,
    SaltProvider, SaltSet, SlotId,
};
pub use status::{configuration_report, KeyStatus};
