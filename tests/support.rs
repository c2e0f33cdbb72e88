//! Shared test fixtures and logging setup

#![allow(dead_code)]

use pseudokey_vault::{Key, KeyGraph, KeyId, MemorySaltProvider};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const A: KeyId = KeyId(1);
pub const B: KeyId = KeyId(2);
pub const C: KeyId = KeyId(3);
pub const D: KeyId = KeyId(4);
pub const X: KeyId = KeyId(5);

/// Initialize test-friendly logging (respects RUST_LOG)
/// Safe to call from every test
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

/// The four singular keys: A (primary), B (parent A), C (primary), D (parent B)
pub fn singular_keys() -> Vec<Key> {
    vec![
        Key::singular(A, "A"),
        Key::secondary(B, "B", A),
        Key::singular(C, "C"),
        Key::secondary(D, "D", B),
    ]
}

/// A, B, C, D inserted through validation
pub fn lineage_graph() -> KeyGraph {
    let mut graph = KeyGraph::new();
    for key in singular_keys() {
        graph.insert(key).expect("valid singular key");
    }
    graph
}

/// [`lineage_graph`] plus compound key X{start = B, end = D}
pub fn graph_with_compound() -> KeyGraph {
    let mut graph = lineage_graph();
    graph
        .insert(Key::compound(X, "X", B, D))
        .expect("valid compound key");
    graph
}

/// Every singular key fully provisioned, salts named after the key and slot
pub fn provisioned_salts() -> MemorySaltProvider {
    ["A", "B", "C", "D"]
        .into_iter()
        .fold(MemorySaltProvider::new(), |provider, name| {
            provider.with_key(
                name,
                (1..=4).map(|n| (format!("salt{n}"), format!("{name}-salt{n}"))),
            )
        })
}

pub fn names(graph: &KeyGraph, ids: &[KeyId]) -> Vec<String> {
    ids.iter()
        .map(|id| graph.get(*id).expect("known key").name.clone())
        .collect()
}
