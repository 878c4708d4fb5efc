//! EC Scaffold - layered template composition for project scaffolding CLIs
//!
//! A project is built by applying a stack of template layers (a base layer, a
//! target layer and an optional UI library layer) onto an output directory,
//! then replacing `{{TOKEN}}` placeholders in every text file.
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - `apply_layer`, `merge_json`, `replace_tokens`
//! - **Layer 2: Orchestration** - `TemplateCatalog` resolution and `compose`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Layer conventions
//!
//! - `<name>.patch.json` is merged into `<name>.json`: top-level keys are
//!   overwritten, `dependencies`, `devDependencies`, `peerDependencies` and
//!   `scripts` are merged entry by entry. Patch values win.
//! - `<name>.patch.<ext>` (`ts`, `tsx`, `js`, `jsx`, `css`, `html`) replaces
//!   `<name>.<ext>`.
//! - Everything else is copied to the same relative path.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use ec_scaffold::{templates, TemplateCatalog, TokenMap};
//!
//! let catalog = TemplateCatalog::load(&root)?;
//! let stack = catalog.resolve(&root, "webresource", Some("kendo"))?;
//! let tokens = TokenMap::for_project("acme", "webresource", Some("kendo"));
//! templates::compose(&stack, &out_dir, &tokens).await?;
//! ```

pub mod error;
pub mod product;
pub mod project;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError};
pub use product::{ProductConfig, Selection};
pub use project::ProjectName;
pub use templates::{
    apply_layer, compose, merge_json, replace_tokens, CompositionReport, LayerStack,
    TemplateCatalog, TokenMap,
};

#[cfg(feature = "tui")]
pub use tui::run;
