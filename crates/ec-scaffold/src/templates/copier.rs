//! Layer application: copy, rename or merge every file of a layer into the project

use crate::error::{Result, ScaffoldError};
use crate::templates::merge;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Marker segment that flags a layer file as an override of a base file
pub const PATCH_MARKER: &str = "patch";

/// Extensions whose `<name>.patch.<ext>` files replace `<name>.<ext>` wholesale
pub const RENAME_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "css", "html"];

/// What to do with a single file found in a layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Copy to the same relative path
    Copy,
    /// Structurally merge into the JSON document with this file name
    Merge(String),
    /// Copy under this file name, overwriting
    Rename(String),
}

/// Decide how a layer file is applied, based on its file name alone
pub fn classify_file(file_name: &str) -> FileAction {
    let merge_suffix = format!(".{}.json", PATCH_MARKER);
    if let Some(stem) = file_name.strip_suffix(&merge_suffix) {
        return FileAction::Merge(format!("{}.json", stem));
    }

    for ext in RENAME_EXTENSIONS {
        let suffix = format!(".{}.{}", PATCH_MARKER, ext);
        if let Some(stem) = file_name.strip_suffix(&suffix) {
            return FileAction::Rename(format!("{}.{}", stem, ext));
        }
    }

    FileAction::Copy
}

/// Create every missing ancestor of `path`
async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::io("Failed to create directory", parent, e))?;
        }
    }
    Ok(())
}

/// Check that a layer root exists and is a directory
async fn check_layer_root(layer_root: &Path) -> Result<()> {
    match fs::metadata(layer_root).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScaffoldError::NotADirectory {
            path: layer_root.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ScaffoldError::LayerNotFound {
            path: layer_root.to_path_buf(),
        }),
        Err(e) => Err(ScaffoldError::io("Failed to read layer", layer_root, e)),
    }
}

/// Apply one layer on top of the project tree.
///
/// Every file of `layer_root` lands in `project_root` at its target path:
/// `*.patch.json` files are merged into the existing document, `*.patch.<ext>`
/// files replace `*.<ext>`, and everything else is copied as is. Entries are
/// visited in file-name order. Symlinks are followed, so a linked
/// directory lands in the project as a real directory.
///
/// Returns the project-relative paths that were written.
pub async fn apply_layer(layer_root: &Path, project_root: &Path) -> Result<Vec<PathBuf>> {
    check_layer_root(layer_root).await?;

    let mut written = Vec::new();

    for entry in WalkDir::new(layer_root)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ScaffoldError::Walk {
            path: layer_root.to_path_buf(),
            source,
        })?;
        let layer_path = entry.path();
        let rel_path = match layer_path.strip_prefix(layer_root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        if entry.file_type().is_dir() {
            let target_dir = project_root.join(rel_path);
            fs::create_dir_all(&target_dir)
                .await
                .map_err(|e| ScaffoldError::io("Failed to create directory", &target_dir, e))?;
            continue;
        }

        let action = entry
            .file_name()
            .to_str()
            .map(classify_file)
            .unwrap_or(FileAction::Copy);

        let target_rel = match &action {
            FileAction::Copy => rel_path.to_path_buf(),
            FileAction::Merge(name) | FileAction::Rename(name) => rel_path.with_file_name(name),
        };
        let target_path = project_root.join(&target_rel);
        ensure_parent(&target_path).await?;

        match action {
            FileAction::Merge(_) => {
                let base = merge::read_json_if_exists(&target_path).await?;
                let patch = merge::read_json(layer_path).await?;
                let merged = merge::merge_json(&base, &patch);
                merge::write_json(&target_path, &merged).await?;
                tracing::debug!(
                    "merged {} into {}",
                    rel_path.display(),
                    target_rel.display()
                );
            }
            FileAction::Rename(_) | FileAction::Copy => {
                fs::copy(layer_path, &target_path)
                    .await
                    .map_err(|e| ScaffoldError::io("Failed to copy", layer_path, e))?;
                tracing::debug!(
                    "copied {} to {}",
                    rel_path.display(),
                    target_rel.display()
                );
            }
        }

        written.push(target_rel);
    }

    Ok(written)
}
