//! Template catalog types and parsing (templates/template.yaml)

use crate::error::{Result, ScaffoldError};
use crate::templates::tokens::{self, TokenMap};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the catalog at the root of a template directory
pub const CATALOG_FILE: &str = "template.yaml";

fn default_base() -> String {
    "base".to_string()
}

/// A target application flavor (webresource, portal, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct TargetDef {
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Layer directory relative to the template root (defaults to targets/<id>)
    #[serde(default)]
    pub dir: Option<String>,

    /// UI layers this target can be combined with
    #[serde(default)]
    pub ui: Vec<String>,
}

impl TargetDef {
    pub fn layer_dir(&self) -> String {
        self.dir
            .clone()
            .unwrap_or_else(|| format!("targets/{}", self.id))
    }

    pub fn supports_ui(&self, ui: &str) -> bool {
        self.ui.iter().any(|u| u == ui)
    }
}

/// A UI library overlay (kendo, shadcn, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct UiDef {
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Layer directory relative to the template root (defaults to ui/<id>)
    #[serde(default)]
    pub dir: Option<String>,
}

impl UiDef {
    pub fn layer_dir(&self) -> String {
        self.dir.clone().unwrap_or_else(|| format!("ui/{}", self.id))
    }
}

/// Root template catalog
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateCatalog {
    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Base layer directory relative to the template root
    #[serde(default = "default_base")]
    pub base: String,

    pub targets: Vec<TargetDef>,

    #[serde(default)]
    pub uis: Vec<UiDef>,

    /// Default token values applied to every project
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

/// Resolved layer roots for one project, in application order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStack {
    pub base: PathBuf,
    pub target: PathBuf,
    pub ui: Option<PathBuf>,
}

impl LayerStack {
    /// Optional layers in the order they are applied after the base
    pub fn overlays(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.target.as_path()).chain(self.ui.as_deref())
    }
}

impl TemplateCatalog {
    /// Read `template.yaml` from a template root
    pub fn load(template_root: &Path) -> Result<Self> {
        let path = template_root.join(CATALOG_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| ScaffoldError::Catalog {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::parse(&path, &content)
    }

    /// Parse catalog YAML; `path` is only used for error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(content).map_err(|e| ScaffoldError::Catalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if catalog.targets.is_empty() {
            return Err(ScaffoldError::Catalog {
                path: path.to_path_buf(),
                reason: "no targets defined".to_string(),
            });
        }

        if let Some(bad) = catalog.tokens.keys().find(|k| !tokens::is_valid_name(k)) {
            return Err(ScaffoldError::Catalog {
                path: path.to_path_buf(),
                reason: format!("invalid token name '{}'", bad),
            });
        }

        for target in &catalog.targets {
            if let Some(unknown) = target.ui.iter().find(|u| catalog.ui(u).is_none()) {
                return Err(ScaffoldError::Catalog {
                    path: path.to_path_buf(),
                    reason: format!(
                        "target '{}' references unknown UI library '{}'",
                        target.id, unknown
                    ),
                });
            }
        }

        Ok(catalog)
    }

    pub fn target(&self, id: &str) -> Option<&TargetDef> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn ui(&self, id: &str) -> Option<&UiDef> {
        self.uis.iter().find(|u| u.id == id)
    }

    /// UI libraries a target can be combined with, in catalog order
    pub fn uis_for(&self, target: &TargetDef) -> Vec<&UiDef> {
        self.uis.iter().filter(|u| target.supports_ui(&u.id)).collect()
    }

    /// Catalog default tokens as a token map
    pub fn default_tokens(&self) -> TokenMap {
        self.tokens
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Look up a target, listing the known ids when it is missing
    pub fn require_target(&self, id: &str) -> Result<&TargetDef> {
        self.target(id).ok_or_else(|| ScaffoldError::UnknownTarget {
            id: id.to_string(),
            available: self
                .targets
                .iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Look up a UI library that `target` can be combined with
    pub fn require_ui(&self, target: &TargetDef, id: &str) -> Result<&UiDef> {
        let ui = self.ui(id).ok_or_else(|| ScaffoldError::UnknownUi {
            id: id.to_string(),
            available: self
                .uis
                .iter()
                .map(|u| u.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })?;
        if !target.supports_ui(id) {
            return Err(ScaffoldError::UiNotSupported {
                target: target.id.clone(),
                ui: id.to_string(),
            });
        }
        Ok(ui)
    }

    /// Resolve the layers to apply for a target and optional UI library
    pub fn resolve(
        &self,
        template_root: &Path,
        target_id: &str,
        ui_id: Option<&str>,
    ) -> Result<LayerStack> {
        let target = self.require_target(target_id)?;
        let ui = ui_id
            .map(|id| self.require_ui(target, id))
            .transpose()?
            .map(|ui| template_root.join(ui.layer_dir()));

        Ok(LayerStack {
            base: template_root.join(&self.base),
            target: template_root.join(target.layer_dir()),
            ui,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
version: "0.1.0"
targets:
  - id: webresource
    name: Webresource App
    description: React app for Dynamics 365 webresources
    ui: [kendo, shadcn]
  - id: mobile
    name: Mobile App
    dir: native/expo
uis:
  - id: kendo
    name: Kendo UI
  - id: shadcn
    name: Shadcn/ui
    dir: ui/shadcn-ui
tokens:
  ORG_NAME: Contoso
"#;

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::parse(Path::new("template.yaml"), CATALOG).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let c = catalog();
        assert_eq!(c.base, "base");
        assert_eq!(c.targets.len(), 2);
        assert_eq!(c.target("webresource").unwrap().layer_dir(), "targets/webresource");
        assert_eq!(c.target("mobile").unwrap().layer_dir(), "native/expo");
        assert_eq!(c.ui("kendo").unwrap().layer_dir(), "ui/kendo");
        assert_eq!(c.default_tokens().get("ORG_NAME"), Some("Contoso"));
    }

    #[test]
    fn test_resolve_with_ui() {
        let stack = catalog()
            .resolve(Path::new("/t"), "webresource", Some("shadcn"))
            .unwrap();
        assert_eq!(stack.base, PathBuf::from("/t/base"));
        assert_eq!(stack.target, PathBuf::from("/t/targets/webresource"));
        assert_eq!(stack.ui, Some(PathBuf::from("/t/ui/shadcn-ui")));

        let overlays: Vec<&Path> = stack.overlays().collect();
        assert_eq!(
            overlays,
            vec![Path::new("/t/targets/webresource"), Path::new("/t/ui/shadcn-ui")]
        );
    }

    #[test]
    fn test_resolve_without_ui() {
        let stack = catalog().resolve(Path::new("/t"), "mobile", None).unwrap();
        assert_eq!(stack.target, PathBuf::from("/t/native/expo"));
        assert!(stack.ui.is_none());
        assert_eq!(stack.overlays().count(), 1);
    }

    #[test]
    fn test_resolve_unknown_target() {
        let err = catalog().resolve(Path::new("/t"), "desktop", None).unwrap_err();
        match err {
            ScaffoldError::UnknownTarget { id, available } => {
                assert_eq!(id, "desktop");
                assert_eq!(available, "webresource, mobile");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_resolve_unknown_ui() {
        let err = catalog()
            .resolve(Path::new("/t"), "webresource", Some("bootstrap"))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownUi { .. }));
    }

    #[test]
    fn test_resolve_ui_not_supported_by_target() {
        let err = catalog()
            .resolve(Path::new("/t"), "mobile", Some("kendo"))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::UiNotSupported { .. }));
    }

    #[test]
    fn test_uis_for_target() {
        let c = catalog();
        let ids: Vec<&str> = c
            .uis_for(c.target("webresource").unwrap())
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(ids, vec!["kendo", "shadcn"]);
        assert!(c.uis_for(c.target("mobile").unwrap()).is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_ui_reference() {
        let yaml = r#"
version: "0.1.0"
targets:
  - id: portal
    name: Portal App
    ui: [material]
"#;
        let err = TemplateCatalog::parse(Path::new("template.yaml"), yaml).unwrap_err();
        assert!(err.to_string().contains("material"));
    }

    #[test]
    fn test_parse_rejects_empty_targets() {
        let yaml = "version: \"0.1.0\"\ntargets: []\n";
        assert!(TemplateCatalog::parse(Path::new("template.yaml"), yaml).is_err());
    }

    #[test]
    fn test_load_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Catalog { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_token_names() {
        let yaml = r#"
version: "0.1.0"
targets:
  - id: portal
    name: Portal App
tokens:
  "ORG NAME}": Contoso
"#;
        let err = TemplateCatalog::parse(Path::new("template.yaml"), yaml).unwrap_err();
        assert!(matches!(err, ScaffoldError::Catalog { .. }));
        assert!(err.to_string().contains("ORG NAME}"));
    }
}
