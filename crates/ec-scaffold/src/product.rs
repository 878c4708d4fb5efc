//! Product configuration trait for CLI binaries
//!
//! Each binary built on this library describes itself through this trait:
//! where its templates live, how it is upgraded, and what to tell the user
//! once a project has been composed.

use std::path::{Path, PathBuf};

/// The choices that produced a project, handed to `next_steps`
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub project_name: &'a str,
    pub project_dir: &'a Path,
    pub target: &'a str,
    pub ui: Option<&'a str>,
}

/// Configuration trait for scaffolding products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template directory used when nothing else is configured
    fn default_template_dir(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, selection: &Selection<'_>) -> Vec<String>;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Environment variable holding the tracing filter, derived from `name`
    fn log_env(&self) -> String {
        format!("{}_LOG", self.name().to_uppercase().replace('-', "_"))
    }

    /// Resolve the template directory: explicit flag, then env var, then default
    fn template_dir(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        std::env::var_os(self.template_dir_env())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(self.default_template_dir()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestProduct;

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn default_template_dir(&self) -> &'static str {
            "templates"
        }
        fn template_dir_env(&self) -> &'static str {
            "EC_SCAFFOLD_TEST_TEMPLATE_DIR_UNSET"
        }
        fn docs_url(&self) -> &'static str {
            "https://example.invalid/docs"
        }
        fn next_steps(&self, selection: &Selection<'_>) -> Vec<String> {
            vec![format!("cd {}", selection.project_dir.display())]
        }
        fn upgrade_command(&self) -> &'static str {
            "cargo install test --force"
        }
    }

    #[test]
    fn test_explicit_template_dir_wins() {
        let dir = TestProduct.template_dir(Some(Path::new("/custom/templates")));
        assert_eq!(dir, PathBuf::from("/custom/templates"));
    }

    #[test]
    fn test_log_env_from_name() {
        assert_eq!(TestProduct.log_env(), "TEST_LOG");
    }

    #[test]
    fn test_default_template_dir() {
        assert_eq!(TestProduct.template_dir(None), PathBuf::from("templates"));
    }
}
