// src/salts/mod.rs
//! Salt lookup
//!
//! Salts never live in the key graph. They sit in an external secret store,
//! reached through [`SaltProvider`] and addressed by key name. Each key has
//! up to four slots: `salt1` pseudonymisation and `salt2` demographic
//! encryption are mandatory, `salt3` clinical and `salt4` rawtext
//! encryption are optional.

pub mod credentials;
pub mod provider;

pub use credentials::CredentialsFile;
pub use provider::*;

use tracing::debug;

use crate::aliases::Salt;
use crate::consts::MANDATORY_SALT_SLOTS;
use crate::core::{Key, KeyGraph, KeyId, Result};
use crate::error::CoreError;

/// All salts of `key`, or [`CoreError::NotConfigured`]
pub fn require_salts<'p, P>(provider: &'p P, key: &Key) -> Result<&'p SaltSet>
where
    P: SaltProvider + ?Sized,
{
    provider
        .lookup(&key.name)
        .ok_or_else(|| CoreError::NotConfigured(key.name.clone()))
}

/// One salt of `key`. `slot` is either a symbolic name (`"id"`, `"demog"`,
/// `"clinical"`, `"rawdata"`) or a slot number.
pub fn salt<'p, P>(provider: &'p P, key: &Key, slot: impl Into<SlotId>) -> Result<&'p Salt>
where
    P: SaltProvider + ?Sized,
{
    let slot = slot.into();
    provider
        .lookup(&key.name)
        .and_then(|salts| salts.slot(&slot))
        .ok_or_else(|| CoreError::SaltNotFound {
            name: key.name.clone(),
            slot: slot.normalised().into_owned(),
        })
}

/// `true` when the store has a non-empty entry for `key`. A missing entry is
/// an ordinary "not provisioned yet", so this never fails.
pub fn configured<P>(provider: &P, key: &Key) -> bool
where
    P: SaltProvider + ?Sized,
{
    provider.lookup(&key.name).is_some_and(|salts| !salts.is_empty())
}

/// Mandatory slots absent for `key`; every one of them when unconfigured
pub fn missing_mandatory_slots<P>(provider: &P, key: &Key) -> Vec<u32>
where
    P: SaltProvider + ?Sized,
{
    MANDATORY_SALT_SLOTS
        .into_iter()
        .filter(|n| salt(provider, key, *n).is_err())
        .collect()
}

/// The salts for `slot` along the chain of key `id`, in application order
pub fn chain_salts<'p, P>(
    provider: &'p P,
    graph: &KeyGraph,
    id: KeyId,
    slot: impl Into<SlotId>,
) -> Result<Vec<&'p Salt>>
where
    P: SaltProvider + ?Sized,
{
    let slot = slot.into();
    let steps = graph.chain_keys(id)?;
    debug!(id = %id, steps = steps.len(), slot = %slot.normalised(), "collecting chain salts");
    steps
        .into_iter()
        .map(|step| salt(provider, step, slot.clone()))
        .collect()
}
