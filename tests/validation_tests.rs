//! Structural validation on insert and update

mod support;

use pseudokey_vault::{validate, CoreError, Key, KeyGraph, KeyId, ValidationError};
use support::*;

fn rejected_with(result: Result<KeyId, CoreError>) -> ValidationError {
    match result {
        Err(CoreError::Validation(err)) => err,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn compound_with_start_on_end_chain_is_accepted() {
    init_tracing();
    let mut graph = lineage_graph();

    assert_eq!(graph.insert(Key::compound(X, "X", B, D)).unwrap(), X);
    assert!(graph.get(X).unwrap().is_compound());
}

#[test]
fn compound_with_start_off_end_chain_is_rejected() {
    let mut graph = lineage_graph();

    let err = rejected_with(graph.insert(Key::compound(KeyId(6), "Y", C, D)));
    assert_eq!(err, ValidationError::InvalidChain("Y".into()));
    assert!(graph.get(KeyId(6)).is_none());
}

#[test]
fn compound_start_must_precede_end() {
    let mut graph = lineage_graph();

    // D is not on the chain of B
    let err = rejected_with(graph.insert(Key::compound(KeyId(6), "backwards", D, B)));
    assert_eq!(err, ValidationError::InvalidChain("backwards".into()));
}

#[test]
fn singular_with_endpoints_is_rejected() {
    let mut graph = lineage_graph();

    let mut with_start = Key::singular(KeyId(6), "with-start");
    with_start.start = Some(A);
    assert_eq!(
        rejected_with(graph.insert(with_start)),
        ValidationError::SingularHasEndpoints("with-start".into())
    );

    let mut with_end = Key::singular(KeyId(7), "with-end");
    with_end.end = Some(D);
    assert_eq!(
        rejected_with(graph.insert(with_end)),
        ValidationError::SingularHasEndpoints("with-end".into())
    );
}

#[test]
fn compound_needs_both_endpoints() {
    let mut graph = lineage_graph();

    let mut no_end = Key::compound(KeyId(6), "no-end", A, D);
    no_end.end = None;
    assert_eq!(
        rejected_with(graph.insert(no_end)),
        ValidationError::CompoundMissingEndpoint("no-end".into())
    );

    let mut no_start = Key::compound(KeyId(7), "no-start", A, D);
    no_start.start = None;
    assert_eq!(
        rejected_with(graph.insert(no_start)),
        ValidationError::CompoundMissingEndpoint("no-start".into())
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let mut graph = lineage_graph();

    assert_eq!(
        rejected_with(graph.insert(Key::singular(KeyId(6), "A"))),
        ValidationError::DuplicateName("A".into())
    );
}

#[test]
fn blank_names_are_rejected() {
    let mut graph = lineage_graph();

    assert_eq!(
        rejected_with(graph.insert(Key::singular(KeyId(6), "  "))),
        ValidationError::BlankName
    );
}

#[test]
fn duplicate_compound_pairs_are_rejected() {
    let mut graph = graph_with_compound();

    assert_eq!(
        rejected_with(graph.insert(Key::compound(KeyId(6), "X-again", B, D))),
        ValidationError::DuplicateCompoundPair {
            name: "X-again".into(),
            existing: "X".into(),
        }
    );
    // a different pair over the same end is fine
    assert!(graph.insert(Key::compound(KeyId(7), "A-to-D", A, D)).is_ok());
}

#[test]
fn compound_with_parent_is_rejected() {
    let mut graph = lineage_graph();

    let mut key = Key::compound(KeyId(6), "parented", B, D);
    key.parent = Some(A);
    assert_eq!(
        rejected_with(graph.insert(key)),
        ValidationError::CompoundHasParent("parented".into())
    );
}

#[test]
fn parent_must_be_singular() {
    let mut graph = graph_with_compound();

    assert_eq!(
        rejected_with(graph.insert(Key::secondary(KeyId(6), "under-compound", X))),
        ValidationError::ParentNotSingular("under-compound".into())
    );
}

#[test]
fn unknown_references_are_rejected() {
    let mut graph = lineage_graph();

    assert!(matches!(
        graph.insert(Key::secondary(KeyId(6), "orphan", KeyId(99))),
        Err(CoreError::UnknownKey(id)) if id == KeyId(99)
    ));
    assert!(matches!(
        graph.insert(Key::compound(KeyId(7), "dangling", A, KeyId(99))),
        Err(CoreError::UnknownKey(id)) if id == KeyId(99)
    ));
}

#[test]
fn existing_ids_cannot_be_inserted_twice() {
    let mut graph = lineage_graph();

    assert!(matches!(
        graph.insert(Key::singular(A, "A2")),
        Err(CoreError::KeyExists(id)) if id == A
    ));
}

#[test]
fn self_parented_key_is_cyclic() {
    let mut graph = lineage_graph();

    assert!(matches!(
        graph.insert(Key::secondary(KeyId(6), "loop", KeyId(6))),
        Err(CoreError::CyclicChain(id)) if id == KeyId(6)
    ));
}

#[test]
fn compound_ending_on_itself_is_cyclic() {
    let mut graph = lineage_graph();

    assert!(matches!(
        graph.insert(Key::compound(KeyId(6), "ouroboros", A, KeyId(6))),
        Err(CoreError::CyclicChain(id)) if id == KeyId(6)
    ));
}

#[test]
fn update_that_closes_a_loop_is_rejected() {
    let mut graph = lineage_graph();

    let err = graph.update(Key::secondary(A, "A", D)).unwrap_err();
    assert!(matches!(err, CoreError::CyclicChain(_)));
    // unchanged
    assert!(graph.get(A).unwrap().is_primary());
    assert_eq!(graph.chain(D).unwrap(), vec![A, B, D]);
}

#[test]
fn update_keeps_own_name_and_pair() {
    let mut graph = graph_with_compound();

    let previous = graph.update(Key::secondary(C, "C", A)).unwrap();
    assert!(previous.is_primary());
    assert_eq!(graph.chain(C).unwrap(), vec![A, C]);

    // re-validating X against itself is not a duplicate pair
    assert!(graph.update(Key::compound(X, "X", B, D)).is_ok());
}

#[test]
fn update_that_moves_a_compound_end_off_its_start_is_rejected() {
    let mut graph = graph_with_compound();

    // D re-parented under C would leave X{start = B, end = D} with B off D's chain
    let err = graph.update(Key::secondary(D, "D", C)).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::InvalidChain(ref name)) if name == "X"
    ));
    assert_eq!(graph.get(D), Some(&Key::secondary(D, "D", B)));
    assert_eq!(graph.chain(D).unwrap(), vec![A, B, D]);
    assert!(graph.check().is_ok());
}

#[test]
fn update_that_turns_a_parent_compound_is_rejected() {
    let mut graph = lineage_graph();

    let err = graph.update(Key::compound(B, "B", A, A)).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::ParentNotSingular(ref name)) if name == "D"
    ));
    assert_eq!(graph.get(B), Some(&Key::secondary(B, "B", A)));
    assert!(graph.check().is_ok());
}

#[test]
fn compound_without_endpoints_reports_missing_endpoint_first() {
    let mut graph = lineage_graph();

    let mut key = Key::compound(KeyId(6), "bare", A, D);
    key.start = None;
    key.end = None;
    key.parent = Some(A);
    assert_eq!(
        rejected_with(graph.insert(key)),
        ValidationError::CompoundMissingEndpoint("bare".into())
    );
}

#[test]
fn update_of_unknown_key_fails() {
    let mut graph = lineage_graph();

    assert!(matches!(
        graph.update(Key::singular(KeyId(42), "ghost")),
        Err(CoreError::UnknownKey(id)) if id == KeyId(42)
    ));
}

#[test]
fn cyclic_end_chain_propagates_instead_of_invalid_chain() {
    let graph = KeyGraph::from_parts(
        [Key::secondary(A, "A", B), Key::secondary(B, "B", A)],
        [],
    );

    let candidate = Key::compound(KeyId(3), "over-cycle", A, B);
    assert!(matches!(
        validate(&candidate, &graph),
        Err(CoreError::CyclicChain(_))
    ));
}

#[test]
fn check_revalidates_stored_keys() {
    assert!(graph_with_compound().check().is_ok());

    let mut keys = singular_keys();
    keys.push(Key::compound(X, "Y", C, D));
    let corrupt = KeyGraph::from_parts(keys, []);
    assert!(matches!(
        corrupt.check(),
        Err(CoreError::Validation(ValidationError::InvalidChain(name))) if name == "Y"
    ));
}
