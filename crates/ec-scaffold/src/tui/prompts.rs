//! Charm-style CLI prompts using cliclack

use crate::product::{ProductConfig, Selection};
use crate::project::{self, ProjectName};
use crate::templates::manifest::{LayerStack, TargetDef, TemplateCatalog, UiDef};
use crate::templates::{self, version, TokenMap};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name, or "." for the current directory
    pub name: Option<String>,

    /// Target application flavor
    pub target: Option<String>,

    /// UI library layer
    pub ui: Option<String>,

    /// Do not apply any UI library layer
    pub no_ui: bool,

    /// Template directory override
    pub template_dir: Option<PathBuf>,

    /// Extra KEY=VALUE tokens
    pub tokens: Vec<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Load the template catalog
    let template_root = config.template_dir(args.template_dir.as_deref());
    let catalog = load_catalog(&template_root)?;

    if let Some(warning) =
        version::check_compatibility(cli_version, &catalog.version, config.upgrade_command())
    {
        cliclack::log::warning(warning)?;
    }

    // Step 2: Project name and directory
    let project = select_project(&args)?;

    // Step 3: Target and UI library
    let target = select_target(&catalog, &args)?;
    let ui = select_ui(&catalog, target, &args)?;

    // Step 4: Check the output directory
    confirm_directory(&project.dir, &args)?;

    // Step 5: Tokens
    let tokens = build_tokens(&catalog, &project, target, ui, &args.tokens)?;

    // Step 6: Compose
    let stack = catalog.resolve(&template_root, &target.id, ui.map(|u| u.id.as_str()))?;
    create_project(&stack, &project, &tokens).await?;

    // Step 7: Show next steps
    let selection = Selection {
        project_name: &project.name,
        project_dir: &project.dir,
        target: &target.id,
        ui: ui.map(|u| u.id.as_str()),
    };
    print_next_steps(config, &selection)?;

    Ok(())
}

fn load_catalog(template_root: &Path) -> Result<TemplateCatalog> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    match TemplateCatalog::load(template_root) {
        Ok(catalog) => {
            spinner.stop(format!(
                "Templates loaded from {} ({} targets)",
                template_root.display(),
                catalog.targets.len()
            ));
            Ok(catalog)
        }
        Err(e) => {
            spinner.stop("Failed to load templates");
            Err(e).context("Pass --template-dir or set the template directory environment variable")
        }
    }
}

fn select_project(args: &CreateArgs) -> Result<ProjectName> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    let input = match &args.name {
        Some(name) => name.clone(),
        None => cliclack::input("What is the name of your project?")
            .placeholder("my-app")
            .validate(|input: &String| {
                if input == "." || project::is_valid_name(input) {
                    Ok(())
                } else {
                    Err("Use \".\" for the current directory, or lowercase letters, numbers, underscores and hyphens")
                }
            })
            .interact()?,
    };

    let project = ProjectName::parse(&input, &cwd)?;
    cliclack::log::info(format!(
        "Project: {} ({})",
        project.name,
        project.dir.display()
    ))?;
    Ok(project)
}

fn select_target<'a>(catalog: &'a TemplateCatalog, args: &CreateArgs) -> Result<&'a TargetDef> {
    if let Some(id) = &args.target {
        return Ok(catalog.require_target(id)?);
    }

    if args.yes || catalog.targets.len() == 1 {
        let target = &catalog.targets[0];
        cliclack::log::info(format!("Using target: {} - {}", target.name, target.description))?;
        return Ok(target);
    }

    let mut select = cliclack::select("What type of application would you like to create?");
    for (idx, target) in catalog.targets.iter().enumerate() {
        select = select.item(idx, &target.name, &target.description);
    }
    let selected: usize = select.interact()?;

    Ok(&catalog.targets[selected])
}

fn select_ui<'a>(
    catalog: &'a TemplateCatalog,
    target: &TargetDef,
    args: &CreateArgs,
) -> Result<Option<&'a UiDef>> {
    if args.no_ui {
        return Ok(None);
    }

    if let Some(id) = &args.ui {
        return Ok(Some(catalog.require_ui(target, id)?));
    }

    let options = catalog.uis_for(target);
    if options.is_empty() {
        return Ok(None);
    }

    if args.yes || options.len() == 1 {
        let ui = options[0];
        cliclack::log::info(format!("Using UI library: {}", ui.name))?;
        return Ok(Some(ui));
    }

    let mut select = cliclack::select("Which UI library would you like to use?");
    for (idx, ui) in options.iter().enumerate() {
        select = select.item(idx, &ui.name, &ui.description);
    }
    let selected: usize = select.interact()?;

    Ok(Some(options[selected]))
}

fn confirm_directory(dir: &Path, args: &CreateArgs) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let count = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .count();
    if count == 0 {
        return Ok(());
    }

    cliclack::log::warning(format!("Directory has {} existing items", count))?;

    // Auto-confirm with --yes flag
    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm("Continue anyway? Existing files may be overwritten")
            .initial_value(false)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(())
}

/// Catalog defaults, then project tokens, then command-line overrides
fn build_tokens(
    catalog: &TemplateCatalog,
    project: &ProjectName,
    target: &TargetDef,
    ui: Option<&UiDef>,
    overrides: &[String],
) -> Result<TokenMap> {
    let mut tokens = catalog.default_tokens();
    tokens.extend(&TokenMap::for_project(
        &project.name,
        &target.id,
        ui.map(|u| u.id.as_str()),
    ));
    for raw in overrides {
        let (name, value) = TokenMap::parse_assignment(raw)?;
        tokens.insert(name, value);
    }
    Ok(tokens)
}

async fn create_project(stack: &LayerStack, project: &ProjectName, tokens: &TokenMap) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let report = match templates::compose(stack, &project.dir, tokens).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e.into());
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        report.files_written,
        project.dir.display()
    ));

    for skipped in &report.skipped {
        cliclack::log::warning(format!("Layer not found, skipped: {}", skipped.display()))?;
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, selection: &Selection<'_>) -> Result<()> {
    let steps = config.next_steps(selection);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, console::style(step).cyan());
    }

    cliclack::outro(format!("Docs: {}", config.docs_url()))?;

    Ok(())
}
