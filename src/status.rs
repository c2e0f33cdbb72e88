// src/status.rs
//! Provisioning status of every key in a graph
//!
//! Combines the key graph with a salt provider to answer "which keys can be
//! used right now". Never exposes salt values.

use serde::Serialize;

use crate::consts::OPTIONAL_SALT_SLOTS;
use crate::core::{Key, KeyGraph, KeyId, Result};
use crate::enums::KeyKind;
use crate::salts::{configured, missing_mandatory_slots, salt, SaltProvider};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
    pub id: KeyId,
    pub name: String,
    pub kind: KeyKind,
    pub parent: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Names of the singular keys applied, in order
    pub chain: Vec<String>,
    pub configured: bool,
    /// Chain steps lacking any mandatory salt
    pub unprovisioned_steps: Vec<String>,
    pub missing_slots: Vec<u32>,
    /// Optional slots (clinical, rawtext) present for this key
    pub optional_slots: Vec<u32>,
}

impl KeyStatus {
    /// Usable when every step of the chain has its mandatory salts
    pub fn is_ready(&self) -> bool {
        self.unprovisioned_steps.is_empty()
    }
}

pub fn key_status<P>(graph: &KeyGraph, provider: &P, key: &Key) -> Result<KeyStatus>
where
    P: SaltProvider + ?Sized,
{
    let name_of = |id: Option<KeyId>| id.and_then(|id| graph.get(id)).map(|k| k.name.clone());
    let chain = graph.chain_keys(key.id)?;

    Ok(KeyStatus {
        id: key.id,
        name: key.name.clone(),
        kind: key.kind,
        parent: name_of(key.parent),
        start: name_of(key.start),
        end: name_of(key.end),
        unprovisioned_steps: chain
            .iter()
            .filter(|step| !missing_mandatory_slots(provider, step).is_empty())
            .map(|step| step.name.clone())
            .collect(),
        chain: chain.iter().map(|step| step.name.clone()).collect(),
        configured: configured(provider, key),
        missing_slots: missing_mandatory_slots(provider, key),
        optional_slots: OPTIONAL_SALT_SLOTS
            .into_iter()
            .filter(|n| salt(provider, key, *n).is_ok())
            .collect(),
    })
}

/// Status of every key in id order
pub fn configuration_report<P>(graph: &KeyGraph, provider: &P) -> Result<Vec<KeyStatus>>
where
    P: SaltProvider + ?Sized,
{
    graph
        .iter()
        .map(|key| key_status(graph, provider, key))
        .collect()
}
