// src/core/mod.rs
pub mod chain;
pub mod graph;
pub mod key;
pub mod registry;
pub mod validate;

pub use chain::*;
pub use graph::*;
pub use key::*;
pub use registry::*;
pub use validate::*;

pub type Result<T> = std::result::Result<T, crate::error::CoreError>;
