//! The salt provider boundary and slot normalisation

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::aliases::Salt;
use crate::consts::{SALT_ENTRY_PREFIX, SALT_SLOTS};

/// External secret store holding the salts of each key, by key name.
///
/// `None` means the store has no entry for the key at all.
pub trait SaltProvider {
    fn lookup(&self, name: &str) -> Option<&SaltSet>;
}

/// Salt slot as asked for by a caller: a symbolic name or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotId(String);

impl SlotId {
    /// Numeric slot for the symbolic names, anything else unchanged
    pub fn normalised(&self) -> Cow<'_, str> {
        SALT_SLOTS
            .iter()
            .find(|(name, _)| *name == self.0)
            .map_or(Cow::Borrowed(self.0.as_str()), |(_, n)| {
                Cow::Owned(n.to_string())
            })
    }

    /// Entry name in the store, e.g. `salt3` for `clinical`
    pub fn entry_name(&self) -> String {
        format!("{SALT_ENTRY_PREFIX}{}", self.normalised())
    }
}

impl From<&str> for SlotId {
    fn from(s: &str) -> Self {
        SlotId(s.to_string())
    }
}

impl From<String> for SlotId {
    fn from(s: String) -> Self {
        SlotId(s)
    }
}

impl From<u32> for SlotId {
    fn from(n: u32) -> Self {
        SlotId(n.to_string())
    }
}

/// The salts stored for one key, by entry name (`salt1`, `salt2`, ...)
#[derive(Default)]
pub struct SaltSet {
    entries: BTreeMap<String, Salt>,
}

impl SaltSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(entry.into(), Salt::new(value.into()));
    }

    pub fn get(&self, entry: &str) -> Option<&Salt> {
        self.entries.get(entry)
    }

    pub fn slot(&self, slot: &SlotId) -> Option<&Salt> {
        self.get(&slot.entry_name())
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SaltSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = SaltSet::new();
        for (entry, value) in iter {
            set.insert(entry, value);
        }
        set
    }
}

// entry names only, values stay out of logs
impl fmt::Debug for SaltSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Salts held in process memory, for embedding and tests
#[derive(Debug, Default)]
pub struct MemorySaltProvider {
    keys: HashMap<String, SaltSet>,
}

impl MemorySaltProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, salts: SaltSet) {
        self.keys.insert(name.into(), salts);
    }

    pub fn with_key<K, V>(mut self, name: &str, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(name, entries.into_iter().collect());
        self
    }
}

impl SaltProvider for MemorySaltProvider {
    fn lookup(&self, name: &str) -> Option<&SaltSet> {
        self.keys.get(name)
    }
}
