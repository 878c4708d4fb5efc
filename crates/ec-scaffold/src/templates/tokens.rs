//! `{{TOKEN}}` substitution over a composed project tree

use crate::error::{Result, ScaffoldError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Placeholder values keyed by token name (without braces)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    tokens: BTreeMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tokens every project gets
    ///
    /// `APP_NAME` and `PROJECT_NAME` both carry the project name. `UI` is only
    /// set when a UI layer was chosen.
    pub fn for_project(project_name: &str, target: &str, ui: Option<&str>) -> Self {
        let mut tokens = Self::new();
        tokens.insert("APP_NAME", project_name);
        tokens.insert("PROJECT_NAME", project_name);
        tokens.insert("TARGET", target);
        if let Some(ui) = ui {
            tokens.insert("UI", ui);
        }
        tokens
    }

    /// Set a token, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(name.into(), value.into());
    }

    /// Overlay another map; its values win
    pub fn extend(&mut self, other: &TokenMap) {
        for (name, value) in &other.tokens {
            self.tokens.insert(name.clone(), value.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Parse a `KEY=VALUE` assignment, as given on the command line
    pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| ScaffoldError::InvalidToken(raw.to_string()))?;
        if !is_valid_name(name) {
            return Err(ScaffoldError::InvalidToken(raw.to_string()));
        }
        Ok((name.to_string(), value.to_string()))
    }

    /// Replace every known placeholder in `content` in a single left-to-right scan.
    ///
    /// Values are inserted literally and never rescanned, so a value that
    /// itself looks like `{{OTHER}}` stays as written. Unknown placeholders
    /// are left untouched.
    pub fn apply(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            // Names hold no braces, so only the next brace can close one
            let value = after
                .find(['{', '}'])
                .filter(|&end| after[end..].starts_with("}}"))
                .and_then(|end| self.tokens.get(&after[..end]).map(|v| (end, v)));

            match value {
                Some((end, value)) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    // Not a known placeholder here; retry one byte further
                    out.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tokens = Self::new();
        for (name, value) in iter {
            tokens.insert(name, value);
        }
        tokens
    }
}

/// Token names: non-empty, no braces, no whitespace
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '{' || c == '}' || c.is_whitespace())
}

/// Can these bytes be treated as text?
pub fn is_text(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

/// Replace tokens in every text file under `root_dir`.
///
/// Files that are not valid UTF-8 are left alone. A file is only rewritten
/// when its content actually changes. Returns the paths (relative to
/// `root_dir`) that were rewritten.
pub async fn replace_tokens(root_dir: &Path, tokens: &TokenMap) -> Result<Vec<PathBuf>> {
    let mut rewritten = Vec::new();

    for entry in WalkDir::new(root_dir)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ScaffoldError::Walk {
            path: root_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let bytes = fs::read(path)
            .await
            .map_err(|e| ScaffoldError::io("Failed to read", path, e))?;
        if !is_text(&bytes) {
            tracing::debug!("skipping binary file {}", path.display());
            continue;
        }

        let content = String::from_utf8_lossy(&bytes);
        let updated = tokens.apply(&content);
        if updated == *content {
            continue;
        }

        fs::write(path, updated)
            .await
            .map_err(|e| ScaffoldError::io("Failed to write", path, e))?;
        tracing::debug!("substituted tokens in {}", path.display());

        let rel = path.strip_prefix(root_dir).unwrap_or(path);
        rewritten.push(rel.to_path_buf());
    }

    Ok(rewritten)
}
