//! Structural validation of keys before they enter a graph
//!
//! Storage enforces nothing on its own: every insert and update goes
//! through [`validate`] first.

use crate::core::chain::ChainResolver;
use crate::core::graph::KeyGraph;
use crate::core::key::Key;
use crate::core::Result;
use crate::enums::KeyKind;
use crate::error::ValidationError;

/// Check `candidate` against `graph`. "Another key" always means a key with
/// a different id, so re-validating a stored key does not collide with itself.
///
/// Chain failures (`CyclicChain`, `UnknownKey`) are returned as they are.
pub fn validate(candidate: &Key, graph: &KeyGraph) -> Result<()> {
    if candidate.name.trim().is_empty() {
        return Err(ValidationError::BlankName.into());
    }
    if graph
        .iter()
        .any(|k| k.id != candidate.id && k.name == candidate.name)
    {
        return Err(ValidationError::DuplicateName(candidate.name.clone()).into());
    }

    let resolver = ChainResolver::with_candidate(graph, candidate);

    match candidate.kind {
        KeyKind::Singular => {
            if candidate.start.is_some() || candidate.end.is_some() {
                return Err(ValidationError::SingularHasEndpoints(candidate.name.clone()).into());
            }
            if let Some(parent) = candidate.parent {
                if !resolver.key(parent)?.is_singular() {
                    return Err(ValidationError::ParentNotSingular(candidate.name.clone()).into());
                }
                // parent links must stay acyclic
                resolver.chain(candidate)?;
            }
        }
        KeyKind::Compound => {
            let (Some(start), Some(end)) = (candidate.start, candidate.end) else {
                return Err(ValidationError::CompoundMissingEndpoint(candidate.name.clone()).into());
            };
            if candidate.parent.is_some() {
                return Err(ValidationError::CompoundHasParent(candidate.name.clone()).into());
            }
            if let Some(existing) = graph
                .compound()
                .find(|k| k.id != candidate.id && k.start == Some(start) && k.end == Some(end))
            {
                return Err(ValidationError::DuplicateCompoundPair {
                    name: candidate.name.clone(),
                    existing: existing.name.clone(),
                }
                .into());
            }

            resolver.key(start)?;
            if !resolver.chain_of(end)?.contains(&start) {
                return Err(ValidationError::InvalidChain(candidate.name.clone()).into());
            }
        }
    }

    Ok(())
}
