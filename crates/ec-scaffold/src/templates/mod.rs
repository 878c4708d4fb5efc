//! Template catalog, layer composition and token substitution
//!
//! This module provides:
//! - The template catalog (`template.yaml`) and layer resolution
//! - Layer application with `*.patch.json` merging and `*.patch.<ext>` renaming
//! - `{{TOKEN}}` substitution over the composed tree
//! - Version compatibility checking

pub mod copier;
pub mod manifest;
pub mod merge;
pub mod tokens;
pub mod version;

use crate::error::{Result, ScaffoldError};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use copier::{apply_layer, classify_file, FileAction};
pub use manifest::{LayerStack, TargetDef, TemplateCatalog, UiDef};
pub use merge::merge_json;
pub use tokens::{replace_tokens, TokenMap};
pub use version::check_compatibility;

/// What a composition run did, for user-facing messaging
#[derive(Debug, Clone, Default)]
pub struct CompositionReport {
    /// Layer roots applied, in order
    pub applied: Vec<PathBuf>,
    /// Optional layer roots that did not exist
    pub skipped: Vec<PathBuf>,
    /// Distinct project-relative files written by the layers
    pub files_written: usize,
    /// Files rewritten by token substitution
    pub files_substituted: usize,
}

/// Compose a project: base layer, target layer, UI layer, then tokens.
///
/// The base layer must exist. A missing target or UI layer is skipped.
/// Every step overwrites, so re-running after a failure converges on the
/// same tree.
pub async fn compose(
    stack: &LayerStack,
    project_root: &Path,
    tokens: &TokenMap,
) -> Result<CompositionReport> {
    if !stack.base.is_dir() {
        return Err(ScaffoldError::BaseLayerMissing {
            path: stack.base.clone(),
        });
    }

    fs::create_dir_all(project_root)
        .await
        .map_err(|e| ScaffoldError::io("Failed to create directory", project_root, e))?;

    let mut report = CompositionReport::default();
    let mut written = std::collections::BTreeSet::new();

    let layers = std::iter::once(stack.base.as_path()).chain(stack.overlays());
    for (index, layer) in layers.enumerate() {
        if index > 0 && !layer.exists() {
            tracing::warn!("layer {} not found, skipping", layer.display());
            report.skipped.push(layer.to_path_buf());
            continue;
        }

        let files = apply_layer(layer, project_root).await?;
        tracing::info!("applied layer {} ({} files)", layer.display(), files.len());
        written.extend(files);
        report.applied.push(layer.to_path_buf());
    }

    let substituted = replace_tokens(project_root, tokens).await?;
    tracing::info!("substituted tokens in {} files", substituted.len());

    report.files_written = written.len();
    report.files_substituted = substituted.len();
    Ok(report)
}

/// Print the targets and UI libraries of a catalog
pub fn print_catalog(catalog: &TemplateCatalog, template_root: &Path) {
    println!(
        "{} {}",
        "Templates in".cyan().bold(),
        template_root.display()
    );
    println!();
    println!("{}", "Targets:".bold());
    for target in &catalog.targets {
        println!("  {} {} - {}", "->".blue(), target.id.green(), target.name);
        if !target.description.is_empty() {
            println!("     {}", target.description.dimmed());
        }
        if !target.ui.is_empty() {
            println!("     UI: {}", target.ui.join(", "));
        }
    }

    if !catalog.uis.is_empty() {
        println!();
        println!("{}", "UI libraries:".bold());
        for ui in &catalog.uis {
            println!("  {} {} - {}", "->".blue(), ui.id.green(), ui.name);
            if !ui.description.is_empty() {
                println!("     {}", ui.description.dimmed());
            }
        }
    }
}
