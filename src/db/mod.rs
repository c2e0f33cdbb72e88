// src/db/mod.rs
//! Persistence of the key graph in an encrypted SQLite database
//!
//! Every write opens an `IMMEDIATE` transaction, loads the graph, runs the
//! same validation as the in-memory graph and only then writes. SQLite's
//! writer lock serialises concurrent writers across processes.

pub mod key_db_conn;
pub mod key_db_ops;

pub use key_db_conn::{init_schema, open_encrypted, open_key_db};
pub use key_db_ops::*;
