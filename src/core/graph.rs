//! The key graph: an arena of keys addressed by [`KeyId`]
//!
//! Mutations validate first and only then touch the arena, so a failed
//! insert, update or delete leaves the graph exactly as it was.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::chain::ChainResolver;
use crate::core::key::{Key, KeyId};
use crate::core::validate::validate;
use crate::core::Result;
use crate::error::CoreError;

/// A user's permission to use a key. Only tracked so deletes can cascade.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyGrant {
    pub key: KeyId,
    pub user: String,
}

/// Everything a cascading delete took out of the graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removal {
    /// The deleted key first, then its secondary keys depth-first
    pub keys: Vec<KeyId>,
    pub grants: Vec<KeyGrant>,
}

#[derive(Debug, Clone, Default)]
pub struct KeyGraph {
    keys: BTreeMap<KeyId, Key>,
    grants: BTreeSet<KeyGrant>,
}

impl KeyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from stored records without validating them (see [`KeyGraph::check`])
    pub fn from_parts(
        keys: impl IntoIterator<Item = Key>,
        grants: impl IntoIterator<Item = KeyGrant>,
    ) -> Self {
        Self {
            keys: keys.into_iter().map(|k| (k.id, k)).collect(),
            grants: grants.into_iter().collect(),
        }
    }

    /// Re-validate every key, e.g. after loading from storage
    pub fn check(&self) -> Result<()> {
        self.keys.values().try_for_each(|key| validate(key, self))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(&id)
    }

    pub fn contains(&self, id: KeyId) -> bool {
        self.keys.contains_key(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Key> {
        self.keys.values().find(|k| k.name == name)
    }

    /// All keys in id order
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.values()
    }

    /// Smallest id above every stored id
    pub fn next_id(&self) -> KeyId {
        KeyId(self.keys.keys().next_back().map_or(1, |id| id.0 + 1))
    }

    pub fn singular(&self) -> impl Iterator<Item = &Key> {
        self.iter().filter(|k| k.is_singular())
    }

    /// Singular keys without a parent
    pub fn primary(&self) -> impl Iterator<Item = &Key> {
        self.iter().filter(|k| k.is_primary())
    }

    /// Singular keys derived from a parent
    pub fn secondary(&self) -> impl Iterator<Item = &Key> {
        self.iter().filter(|k| k.is_secondary())
    }

    pub fn compound(&self) -> impl Iterator<Item = &Key> {
        self.iter().filter(|k| k.is_compound())
    }

    /// Secondary keys whose parent is `id`
    pub fn children_of(&self, id: KeyId) -> impl Iterator<Item = &Key> {
        self.secondary().filter(move |k| k.parent == Some(id))
    }

    pub fn chain(&self, id: KeyId) -> Result<Vec<KeyId>> {
        ChainResolver::new(self).chain_of(id)
    }

    pub fn chain_keys(&self, id: KeyId) -> Result<Vec<&Key>> {
        self.chain(id)?
            .into_iter()
            .map(|step| self.get(step).ok_or(CoreError::UnknownKey(step)))
            .collect()
    }

    pub fn insert(&mut self, key: Key) -> Result<KeyId> {
        if self.contains(key.id) {
            return Err(CoreError::KeyExists(key.id));
        }
        validate(&key, self)?;

        let id = key.id;
        info!(key = %key.name, id = %id, kind = %key.kind, "key created");
        self.keys.insert(id, key);
        Ok(id)
    }

    /// Replace a stored key, returning the previous version.
    ///
    /// Keys pointing at the updated key and every compound key are
    /// re-validated against the new version; if any of them breaks, the
    /// previous version is put back and the error returned.
    pub fn update(&mut self, key: Key) -> Result<Key> {
        if !self.contains(key.id) {
            return Err(CoreError::UnknownKey(key.id));
        }
        validate(&key, self)?;

        let id = key.id;
        let name = key.name.clone();
        let previous = self.keys.insert(id, key).ok_or(CoreError::UnknownKey(id))?;
        if let Err(err) = self.check_dependents(id) {
            self.keys.insert(id, previous);
            return Err(err);
        }

        info!(key = %name, id = %id, "key updated");
        Ok(previous)
    }

    fn check_dependents(&self, id: KeyId) -> Result<()> {
        self.iter()
            .filter(|k| k.id != id && (k.is_compound() || k.references().any(|r| r == id)))
            .try_for_each(|k| validate(k, self))
    }

    pub fn grant(&mut self, key: KeyId, user: impl Into<String>) -> Result<()> {
        if !self.contains(key) {
            return Err(CoreError::UnknownKey(key));
        }
        self.grants.insert(KeyGrant {
            key,
            user: user.into(),
        });
        Ok(())
    }

    pub fn grants(&self) -> impl Iterator<Item = &KeyGrant> {
        self.grants.iter()
    }

    pub fn grants_for(&self, key: KeyId) -> impl Iterator<Item = &KeyGrant> {
        self.grants.iter().filter(move |g| g.key == key)
    }

    /// Delete a key together with all of its secondary keys and every grant
    /// on any of them.
    ///
    /// Refused with [`CoreError::KeyInUse`] when a surviving key still points
    /// at one of the keys that would go.
    pub fn remove(&mut self, id: KeyId) -> Result<Removal> {
        if !self.contains(id) {
            return Err(CoreError::UnknownKey(id));
        }

        let mut doomed = Vec::new();
        self.collect_cascade(id, &mut doomed);
        let doomed_set: HashSet<KeyId> = doomed.iter().copied().collect();

        for survivor in self.iter().filter(|k| !doomed_set.contains(&k.id)) {
            if let Some(key) = survivor.references().find(|r| doomed_set.contains(r)) {
                return Err(CoreError::KeyInUse {
                    key,
                    referenced_by: survivor.id,
                });
            }
        }

        let (gone, kept): (BTreeSet<KeyGrant>, BTreeSet<KeyGrant>) =
            std::mem::take(&mut self.grants)
                .into_iter()
                .partition(|g| doomed_set.contains(&g.key));
        self.grants = kept;
        for key in &doomed {
            self.keys.remove(key);
        }

        info!(id = %id, keys = doomed.len(), grants = gone.len(), "key deleted");
        Ok(Removal {
            keys: doomed,
            grants: gone.into_iter().collect(),
        })
    }

    fn collect_cascade(&self, id: KeyId, out: &mut Vec<KeyId>) {
        // visited check also stops on corrupt cyclic parent data
        if out.contains(&id) {
            return;
        }
        out.push(id);
        let children: Vec<KeyId> = self.children_of(id).map(|k| k.id).collect();
        for child in children {
            self.collect_cascade(child, out);
        }
    }
}
