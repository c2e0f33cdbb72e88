//! Chain resolution
//!
//! The chain of a key is the ordered list of singular keys whose salts are
//! applied, in application order, to realise that key:
//!
//! - singular: `chain(parent) ++ [key]`, or `[key]` for a primary key
//! - compound: `chain(start) ++ (chain(end) \ chain(start))`
//!
//! Resolution is a pure read over a [`KeyGraph`]. A key met again while it
//! is still being resolved is reported as [`CoreError::CyclicChain`].

use std::collections::HashSet;

use tracing::debug;

use crate::core::graph::KeyGraph;
use crate::core::key::{Key, KeyId};
use crate::core::Result;
use crate::enums::KeyKind;
use crate::error::{CoreError, ValidationError};

#[derive(Debug, Clone, Copy)]
pub struct ChainResolver<'g> {
    graph: &'g KeyGraph,
    candidate: Option<&'g Key>,
}

impl<'g> ChainResolver<'g> {
    pub fn new(graph: &'g KeyGraph) -> Self {
        Self {
            graph,
            candidate: None,
        }
    }

    /// Resolve against `graph` as it would look with `candidate` committed
    pub fn with_candidate(graph: &'g KeyGraph, candidate: &'g Key) -> Self {
        Self {
            graph,
            candidate: Some(candidate),
        }
    }

    /// Look a key up by id, the candidate shadowing any stored key with the same id
    pub fn key(&self, id: KeyId) -> Result<&'g Key> {
        match self.candidate {
            Some(candidate) if candidate.id == id => Ok(candidate),
            _ => self.graph.get(id).ok_or(CoreError::UnknownKey(id)),
        }
    }

    pub fn chain(&self, key: &Key) -> Result<Vec<KeyId>> {
        let mut stack = Vec::new();
        let chain = self.walk(key, &mut stack)?;
        debug!(key = %key.name, steps = chain.len(), "resolved key chain");
        Ok(chain)
    }

    pub fn chain_of(&self, id: KeyId) -> Result<Vec<KeyId>> {
        self.chain(self.key(id)?)
    }

    fn walk(&self, key: &Key, stack: &mut Vec<KeyId>) -> Result<Vec<KeyId>> {
        if stack.contains(&key.id) {
            return Err(CoreError::CyclicChain(key.id));
        }
        stack.push(key.id);

        let chain = match key.kind {
            KeyKind::Singular => {
                let mut chain = match key.parent {
                    Some(parent) => self.walk(self.key(parent)?, stack)?,
                    None => Vec::new(),
                };
                chain.push(key.id);
                chain
            }
            KeyKind::Compound => {
                let (Some(start), Some(end)) = (key.start, key.end) else {
                    return Err(ValidationError::CompoundMissingEndpoint(key.name.clone()).into());
                };
                let mut chain = self.walk(self.key(start)?, stack)?;
                let end_chain = self.walk(self.key(end)?, stack)?;

                let seen: HashSet<KeyId> = chain.iter().copied().collect();
                chain.extend(end_chain.into_iter().filter(|id| !seen.contains(id)));
                chain
            }
        };

        stack.pop();
        Ok(chain)
    }
}
