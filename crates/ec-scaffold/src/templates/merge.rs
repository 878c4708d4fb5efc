//! Structured merge for `*.patch.json` documents
//!
//! The top level is a shallow overwrite. The well-known collection keys of a
//! package manifest are merged entry by entry instead, so a layer can add a
//! dependency or a script without restating the ones the base already has.

use crate::error::{Result, ScaffoldError};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// Top-level keys that are merged entry by entry
pub const MERGE_KEYS: &[&str] = &[
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "scripts",
];

/// Merge `patch` over `base`. Patch values win every conflict.
pub fn merge_json(base: &Map<String, Value>, patch: &Map<String, Value>) -> Map<String, Value> {
    let mut result = base.clone();
    for (key, value) in patch {
        result.insert(key.clone(), value.clone());
    }

    for key in MERGE_KEYS {
        let base_entries = base.get(*key).and_then(Value::as_object);
        let patch_entries = patch.get(*key).and_then(Value::as_object);

        // Neither side has a collection: the shallow result stands
        if base_entries.is_none() && patch_entries.is_none() {
            continue;
        }

        let mut merged = base_entries.cloned().unwrap_or_default();
        if let Some(entries) = patch_entries {
            for (name, value) in entries {
                merged.insert(name.clone(), value.clone());
            }
        }
        result.insert((*key).to_string(), Value::Object(merged));
    }

    result
}

/// Parse a JSON document that must be an object at the top level
pub fn parse_document(path: &Path, content: &str) -> Result<Map<String, Value>> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(content).map_err(|source| ScaffoldError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ScaffoldError::InvalidDocument {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a JSON document, treating a missing file as an empty document
pub async fn read_json_if_exists(path: &Path) -> Result<Map<String, Value>> {
    match fs::read_to_string(path).await {
        Ok(content) => parse_document(path, &content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
        Err(e) => Err(ScaffoldError::io("Failed to read", path, e)),
    }
}

/// Read a JSON document that has to exist
pub async fn read_json(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ScaffoldError::io("Failed to read", path, e))?;
    parse_document(path, &content)
}

/// Render a document with two-space indentation and a trailing newline
pub fn render_document(document: &Map<String, Value>) -> String {
    // Serializing a Map<String, Value> cannot fail
    let mut out = serde_json::to_string_pretty(document).unwrap_or_default();
    out.push('\n');
    out
}

/// Write a document, replacing whatever is at `path`
pub async fn write_json(path: &Path, document: &Map<String, Value>) -> Result<()> {
    fs::write(path, render_document(document))
        .await
        .map_err(|e| ScaffoldError::io("Failed to write", path, e))
}
