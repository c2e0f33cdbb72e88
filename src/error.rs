// src/error.rs
//! Public error types for the entire crate

use thiserror::Error;

use crate::core::key::KeyId;

/// Structural invariant broken by a candidate key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name can't be blank")]
    BlankName,

    #[error("name {0:?} has already been taken")]
    DuplicateName(String),

    #[error("singular key {0:?} must not have a start or end key")]
    SingularHasEndpoints(String),

    #[error("compound key {0:?} needs both a start and an end key")]
    CompoundMissingEndpoint(String),

    #[error("compound key {0:?} must not have a parent key")]
    CompoundHasParent(String),

    #[error("parent of {0:?} is not a singular key")]
    ParentNotSingular(String),

    #[error("compound key {name:?} duplicates the start/end pair of {existing:?}")]
    DuplicateCompoundPair { name: String, existing: String },

    #[error("start key of {0:?} is not on the chain of its end key")]
    InvalidChain(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid key: {0}")]
    Validation(#[from] ValidationError),

    #[error("cyclic key chain through key {0}")]
    CyclicChain(KeyId),

    #[error("no key with id {0}")]
    UnknownKey(KeyId),

    #[error("a key with id {0} already exists")]
    KeyExists(KeyId),

    #[error("key {key} is still referenced by key {referenced_by}")]
    KeyInUse { key: KeyId, referenced_by: KeyId },

    #[error("salt{slot} not found for key {name:?}")]
    SaltNotFound { name: String, slot: String },

    #[error("key {0:?} is not configured in the salt store")]
    NotConfigured(String),

    #[error("{0} required")]
    MissingSecret(&'static str),

    #[error("unknown key type {0:?}")]
    UnknownKeyType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
