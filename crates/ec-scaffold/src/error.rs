//! Error types for layer composition

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Everything that can go wrong while composing a project
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A layer root handed to the composer does not exist
    #[error("Layer not found: {}", path.display())]
    LayerNotFound { path: PathBuf },

    /// A layer root exists but is a file
    #[error("Layer root is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// The mandatory base layer is missing from the template root
    #[error("Base layer missing: {} (check the template directory)", path.display())]
    BaseLayerMissing { path: PathBuf },

    /// A structured document parsed, but is not a JSON object
    #[error("{} is not a JSON object", path.display())]
    InvalidDocument { path: PathBuf },

    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// template.yaml could not be read or parsed
    #[error("Invalid template catalog {}: {reason}", path.display())]
    Catalog { path: PathBuf, reason: String },

    #[error("Unknown target '{id}'. Available targets: {available}")]
    UnknownTarget { id: String, available: String },

    #[error("Unknown UI library '{id}'. Available UI libraries: {available}")]
    UnknownUi { id: String, available: String },

    #[error("Target '{target}' does not support UI library '{ui}'")]
    UiNotSupported { target: String, ui: String },

    #[error(
        "Invalid project name '{0}': use \".\" for the current directory, or lowercase letters, numbers, underscores and hyphens"
    )]
    InvalidProjectName(String),

    #[error("Invalid token '{0}': expected KEY=VALUE with a non-empty KEY and no braces or whitespace")]
    InvalidToken(String),
}

impl ScaffoldError {
    /// Wrap an I/O error with the path and the action that failed
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
