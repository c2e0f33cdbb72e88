// src/config/mod.rs
//! Configuration system for pseudokey-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config, Features, Keys, Paths};

mod app;
mod defaults;
