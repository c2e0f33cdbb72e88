// src/export/json.rs
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::consts::EXPORT_FORMAT;
use crate::core::{KeyGraph, Result};
use crate::salts::SaltProvider;
use crate::status::configuration_report;

/// JSON manifest of every key: kind, relations, resolved chain and whether
/// its salts are provisioned.
pub fn manifest<P>(graph: &KeyGraph, provider: &P) -> Result<Value>
where
    P: SaltProvider + ?Sized,
{
    let keys = configuration_report(graph, provider)?;
    let configured = keys.iter().filter(|k| k.configured).count();

    Ok(json!({
        "export_format": EXPORT_FORMAT,
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_keys": keys.len(),
        "configured_keys": configured,
        "primary_keys": graph.primary().count(),
        "secondary_keys": graph.secondary().count(),
        "compound_keys": graph.compound().count(),
        "keys": keys,
    }))
}

/// Write [`manifest`] to `path` as pretty JSON, returning the number of keys
pub fn export_to_json<P>(graph: &KeyGraph, provider: &P, path: impl AsRef<Path>) -> Result<usize>
where
    P: SaltProvider + ?Sized,
{
    let export = manifest(graph, provider)?;
    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&export)?)?;

    info!(keys = graph.len(), path = %path.as_ref().display(), "exported key manifest");
    Ok(graph.len())
}
