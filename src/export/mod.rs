// src/export/mod.rs
//! Export utilities for pseudokey-vault
//!
//! Exports describe keys and their provisioning status only. Salt values
//! are never written out.

pub use json::{export_to_json, manifest};

pub mod json;
