//! Compose every target of the shipped template catalog end to end

use ec_scaffold::{compose, TemplateCatalog, TokenMap};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_catalog_parses_and_layers_exist() {
    let root = template_root();
    let catalog = TemplateCatalog::load(&root).unwrap();

    assert!(root.join(&catalog.base).is_dir());
    for target in &catalog.targets {
        assert!(
            root.join(target.layer_dir()).is_dir(),
            "missing layer for target {}",
            target.id
        );
        for ui in catalog.uis_for(target) {
            assert!(root.join(ui.layer_dir()).is_dir(), "missing layer for ui {}", ui.id);
        }
    }
}

#[tokio::test]
async fn test_webresource_with_kendo() {
    let root = template_root();
    let catalog = TemplateCatalog::load(&root).unwrap();
    let stack = catalog.resolve(&root, "webresource", Some("kendo")).unwrap();
    let out = tempfile::tempdir().unwrap();
    let project = out.path().join("acme");

    let mut tokens = catalog.default_tokens();
    tokens.extend(&TokenMap::for_project("acme", "webresource", Some("kendo")));
    let report = compose(&stack, &project, &tokens).await.unwrap();

    assert_eq!(report.applied.len(), 3);
    assert!(report.skipped.is_empty());

    let pkg = read_json(&project.join("package.json"));
    assert_eq!(pkg["name"], "acme");
    assert_eq!(pkg["scripts"]["dev"], "vite");
    assert_eq!(
        pkg["scripts"]["build:dev"],
        "tsc -b && vite build --mode development"
    );
    assert_eq!(pkg["dependencies"]["react"], "^19.1.0");
    assert_eq!(pkg["dependencies"]["zustand"], "^5.0.6");
    assert!(pkg["dependencies"]["@progress/kendo-react-buttons"].is_string());
    assert_eq!(pkg["devDependencies"]["typescript"], "~5.8.3");

    // Renamed overrides
    assert!(project.join("vite.config.ts").is_file());
    assert!(!project.join("vite.config.patch.ts").exists());
    let main = std::fs::read_to_string(project.join("src/main.tsx")).unwrap();
    assert!(main.contains("kendo-theme-default"));
    assert!(!project.join("src/main.patch.tsx").exists());
    assert_eq!(
        std::fs::read_to_string(project.join("src/index.css")).unwrap(),
        "@import \"tailwindcss\";\n"
    );

    // Tokens
    let readme = std::fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.starts_with("# acme\n"));
    assert!(readme.contains("webresource application created with ec-create for EC."));

    // Binary content is untouched
    assert_eq!(
        std::fs::read(project.join("public/favicon.ico")).unwrap(),
        std::fs::read(root.join("base/public/favicon.ico")).unwrap()
    );
}

#[tokio::test]
async fn test_mobile_without_ui() {
    let root = template_root();
    let catalog = TemplateCatalog::load(&root).unwrap();
    let stack = catalog.resolve(&root, "mobile", None).unwrap();
    let out = tempfile::tempdir().unwrap();
    let project = out.path().join("field-app");

    let tokens = TokenMap::for_project("field-app", "mobile", None);
    compose(&stack, &project, &tokens).await.unwrap();

    let pkg = read_json(&project.join("package.json"));
    assert_eq!(pkg["main"], "expo-router/entry");
    assert_eq!(pkg["scripts"]["start"], "expo start");
    // Base scripts survive the merge
    assert_eq!(pkg["scripts"]["build"], "tsc -b && vite build");

    let layout = std::fs::read_to_string(project.join("app/_layout.tsx")).unwrap();
    assert!(layout.contains("screenOptions={{ title: \"field-app\" }}"));

    let app = read_json(&project.join("app.json"));
    assert_eq!(app["expo"]["slug"], "field-app");
}

#[tokio::test]
async fn test_every_target_composes_twice_identically() {
    let root = template_root();
    let catalog = TemplateCatalog::load(&root).unwrap();

    for target in &catalog.targets {
        let ui = catalog.uis_for(target).first().map(|u| u.id.clone());
        let stack = catalog.resolve(&root, &target.id, ui.as_deref()).unwrap();
        let out = tempfile::tempdir().unwrap();
        let project = out.path().join("demo");
        let tokens = TokenMap::for_project("demo", &target.id, ui.as_deref());

        compose(&stack, &project, &tokens).await.unwrap();
        let first = std::fs::read_to_string(project.join("package.json")).unwrap();
        compose(&stack, &project, &tokens).await.unwrap();
        let second = std::fs::read_to_string(project.join("package.json")).unwrap();

        assert_eq!(first, second, "target {} is not idempotent", target.id);
        assert!(!first.contains("{{APP_NAME}}"));
    }
}
