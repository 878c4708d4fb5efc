//! Project name validation and output directory resolution

use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// A validated project name and the directory it will be created in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName {
    pub name: String,
    pub dir: PathBuf,
}

impl ProjectName {
    /// Validate a project name relative to `cwd`.
    ///
    /// `.` scaffolds into `cwd` itself and takes its directory name. Anything
    /// else must be lowercase letters, digits, `_` or `-`, and becomes a
    /// subdirectory of `cwd`.
    pub fn parse(input: &str, cwd: &Path) -> Result<Self> {
        if input == "." {
            let name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| ScaffoldError::InvalidProjectName(input.to_string()))?;
            return Ok(Self {
                name: name.to_string(),
                dir: cwd.to_path_buf(),
            });
        }

        if !is_valid_name(input) {
            return Err(ScaffoldError::InvalidProjectName(input.to_string()));
        }

        Ok(Self {
            name: input.to_string(),
            dir: cwd.join(input),
        })
    }
}

/// Lowercase letters, digits, `_` and `-`, at least one character
pub fn is_valid_name(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
