//! A key graph shared between threads
//!
//! Readers work on the graph concurrently. Writers take the single write
//! lock, so a write is validated and committed against the same graph. A
//! write runs on a staged copy and is swapped in only if it succeeds.

use std::sync::{PoisonError, RwLock};

use crate::core::graph::{KeyGraph, Removal};
use crate::core::key::{Key, KeyId};
use crate::core::Result;

#[derive(Debug, Default)]
pub struct KeyRegistry {
    graph: RwLock<KeyGraph>,
}

impl KeyRegistry {
    pub fn new(graph: KeyGraph) -> Self {
        Self {
            graph: RwLock::new(graph),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&KeyGraph) -> R) -> R {
        let graph = self.graph.read().unwrap_or_else(PoisonError::into_inner);
        f(&graph)
    }

    /// Run `f` on a copy of the graph and commit the copy only on success
    pub fn write<R>(&self, f: impl FnOnce(&mut KeyGraph) -> Result<R>) -> Result<R> {
        let mut graph = self.graph.write().unwrap_or_else(PoisonError::into_inner);
        let mut staged = graph.clone();
        let out = f(&mut staged)?;
        *graph = staged;
        Ok(out)
    }

    pub fn snapshot(&self) -> KeyGraph {
        self.read(KeyGraph::clone)
    }

    pub fn chain(&self, id: KeyId) -> Result<Vec<KeyId>> {
        self.read(|g| g.chain(id))
    }

    pub fn insert(&self, key: Key) -> Result<KeyId> {
        self.write(|g| g.insert(key))
    }

    pub fn update(&self, key: Key) -> Result<Key> {
        self.write(|g| g.update(key))
    }

    pub fn remove(&self, id: KeyId) -> Result<Removal> {
        self.write(|g| g.remove(id))
    }
}
