//! The key entity and its identifier
//!
//! Relations between keys are plain `KeyId`s resolved through a
//! [`KeyGraph`](crate::core::graph::KeyGraph), never owning pointers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::KeyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(pub i64);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for KeyId {
    fn from(id: i64) -> Self {
        KeyId(id)
    }
}

/// A pseudonymisation key. Salts are not stored here; they live in the
/// salt provider under `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub id: KeyId,
    pub name: String,
    pub kind: KeyKind,
    pub parent: Option<KeyId>,
    pub start: Option<KeyId>,
    pub end: Option<KeyId>,
}

impl Key {
    /// A primary singular key (no parent)
    pub fn singular(id: KeyId, name: impl Into<String>) -> Self {
        Key {
            id,
            name: name.into(),
            kind: KeyKind::Singular,
            parent: None,
            start: None,
            end: None,
        }
    }

    /// A secondary singular key derived from `parent`
    pub fn secondary(id: KeyId, name: impl Into<String>, parent: KeyId) -> Self {
        Key {
            parent: Some(parent),
            ..Key::singular(id, name)
        }
    }

    pub fn compound(id: KeyId, name: impl Into<String>, start: KeyId, end: KeyId) -> Self {
        Key {
            id,
            name: name.into(),
            kind: KeyKind::Compound,
            parent: None,
            start: Some(start),
            end: Some(end),
        }
    }

    #[inline]
    pub fn is_singular(&self) -> bool {
        self.kind == KeyKind::Singular
    }

    #[inline]
    pub fn is_compound(&self) -> bool {
        self.kind == KeyKind::Compound
    }

    /// Singular key with no parent
    pub fn is_primary(&self) -> bool {
        self.is_singular() && self.parent.is_none()
    }

    /// Singular key derived from another key
    pub fn is_secondary(&self) -> bool {
        self.is_singular() && self.parent.is_some()
    }

    /// Every id this key points at
    pub fn references(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.parent.into_iter().chain(self.start).chain(self.end)
    }
}
