//! Chain resolution over singular lineages and compound keys

mod support;

use pseudokey_vault::{ChainResolver, CoreError, Key, KeyGraph, KeyId, ValidationError};
use support::*;

#[test]
fn primary_key_chain_is_itself() {
    init_tracing();
    let graph = lineage_graph();

    assert_eq!(graph.chain(A).unwrap(), vec![A]);
    assert_eq!(graph.chain(C).unwrap(), vec![C]);
}

#[test]
fn secondary_key_chain_extends_parent_chain() {
    let graph = lineage_graph();

    let mut expected = graph.chain(A).unwrap();
    expected.push(B);
    assert_eq!(graph.chain(B).unwrap(), expected);
    assert_eq!(graph.chain(D).unwrap(), vec![A, B, D]);
}

#[test]
fn compound_chain_applies_start_then_remaining_end_steps() {
    let graph = graph_with_compound();

    // [A, B] ++ ([A, B, D] \ [A, B])
    assert_eq!(graph.chain(X).unwrap(), vec![A, B, D]);
    assert_eq!(graph.chain(X).unwrap(), graph.chain(D).unwrap());
}

#[test]
fn compound_over_primary_start_equals_end_chain() {
    let mut graph = lineage_graph();
    graph.insert(Key::compound(KeyId(10), "A-to-D", A, D)).unwrap();

    assert_eq!(graph.chain(KeyId(10)).unwrap(), vec![A, B, D]);
}

#[test]
fn chain_keys_resolve_to_stored_keys() {
    let graph = graph_with_compound();

    let steps: Vec<&str> = graph
        .chain_keys(X)
        .unwrap()
        .into_iter()
        .map(|k| k.name.as_str())
        .collect();
    assert_eq!(steps, ["A", "B", "D"]);
    assert!(graph.chain_keys(X).unwrap().iter().all(|k| k.is_singular()));
}

#[test]
fn difference_keeps_end_ordering_and_drops_start_steps() {
    // C is not on D's chain; stored without validation to exercise the resolver alone
    let mut keys = singular_keys();
    keys.push(Key::compound(X, "unchecked", C, D));
    let graph = KeyGraph::from_parts(keys, []);

    assert_eq!(graph.chain(X).unwrap(), vec![C, A, B, D]);
}

#[test]
fn shared_ancestors_are_not_mistaken_for_cycles() {
    let mut keys = singular_keys();
    keys.push(Key::compound(X, "X", B, D));
    keys.push(Key::compound(KeyId(6), "nested", X, D));
    let graph = KeyGraph::from_parts(keys, []);

    assert_eq!(graph.chain(KeyId(6)).unwrap(), vec![A, B, D]);
}

#[test]
fn cyclic_parents_are_reported() {
    let graph = KeyGraph::from_parts(
        [Key::secondary(A, "A", B), Key::secondary(B, "B", A)],
        [],
    );

    assert!(matches!(graph.chain(A), Err(CoreError::CyclicChain(_))));
    assert!(matches!(graph.chain(B), Err(CoreError::CyclicChain(_))));
}

#[test]
fn self_parent_is_a_cycle() {
    let graph = KeyGraph::from_parts([Key::secondary(A, "A", A)], []);

    assert!(matches!(graph.chain(A), Err(CoreError::CyclicChain(id)) if id == A));
}

#[test]
fn dangling_parent_is_reported() {
    let graph = KeyGraph::from_parts([Key::secondary(B, "B", A)], []);

    assert!(matches!(graph.chain(B), Err(CoreError::UnknownKey(id)) if id == A));
    assert!(matches!(graph.chain(A), Err(CoreError::UnknownKey(id)) if id == A));
}

#[test]
fn stored_compound_without_end_is_rejected() {
    let mut broken = Key::compound(X, "X", A, D);
    broken.end = None;
    let graph = KeyGraph::from_parts([Key::singular(A, "A"), broken], []);

    assert!(matches!(
        graph.chain(X),
        Err(CoreError::Validation(ValidationError::CompoundMissingEndpoint(name))) if name == "X"
    ));
}

#[test]
fn resolver_sees_candidate_in_place_of_stored_key() {
    let graph = lineage_graph();
    // C re-parented under D
    let candidate = Key::secondary(C, "C", D);

    let resolver = ChainResolver::with_candidate(&graph, &candidate);
    assert_eq!(resolver.chain_of(C).unwrap(), vec![A, B, D, C]);

    // the graph itself is untouched
    assert_eq!(graph.chain(C).unwrap(), vec![C]);
    assert_eq!(graph.len(), 4);
}

#[test]
fn end_to_end_names() {
    let graph = graph_with_compound();

    assert_eq!(names(&graph, &graph.chain(X).unwrap()), ["A", "B", "D"]);
}
