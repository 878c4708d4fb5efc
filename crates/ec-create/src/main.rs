//! EC App Creator - project scaffolding for EC applications

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use ec_scaffold::tui::CreateArgs;
use ec_scaffold::{ProductConfig, Selection, TemplateCatalog};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// EC product configuration
#[derive(Clone)]
pub struct EcConfig;

impl ProductConfig for EcConfig {
    fn name(&self) -> &'static str {
        "ec-create"
    }

    fn display_name(&self) -> &'static str {
        "EC App Creator"
    }

    fn default_template_dir(&self) -> &'static str {
        "templates"
    }

    fn template_dir_env(&self) -> &'static str {
        "EC_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/ec-apps/ec-create#readme"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install ec-create --force"
    }

    fn next_steps(&self, selection: &Selection<'_>) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(selection.project_dir) {
            steps.push(format!("cd {}", selection.project_name));
        }

        // Step 2: Install dependencies
        steps.push("npm install".to_string());

        // Step 3: Kendo needs its licence activated before the first build
        if selection.ui == Some("kendo") {
            steps.push("npx kendo-ui-license activate".to_string());
        }

        // Step 4: Start / build
        if selection.target == "mobile" {
            steps.push("npm run start".to_string());
        } else {
            steps.push("npm run dev".to_string());
            steps.push("npm run build".to_string());
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "ec-create")]
#[command(about = "Create applications for your EC ecosystem")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project (the default)
    Create(CliCreateArgs),
    /// List the targets and UI libraries in the template directory
    List(ListArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CliCreateArgs {
    /// Project name, or "." to use the current directory
    pub name: Option<String>,

    /// Target application type (webresource, portal, power-pages, mobile)
    #[arg(short, long)]
    pub target: Option<String>,

    /// UI library layer to apply (kendo, shadcn)
    #[arg(short, long, conflicts_with = "no_ui")]
    pub ui: Option<String>,

    /// Do not apply a UI library layer
    #[arg(long = "no-ui")]
    pub no_ui: bool,

    /// Directory containing template.yaml and the template layers
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Extra placeholder values (KEY=VALUE), may be repeated
    #[arg(long = "token", value_name = "KEY=VALUE")]
    pub tokens: Vec<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            target: args.target,
            ui: args.ui,
            no_ui: args.no_ui,
            template_dir: args.template_dir,
            tokens: args.tokens,
            yes: args.yes,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Directory containing template.yaml and the template layers
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

fn init_logging(config: &EcConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_env(config.log_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn create(config: &EcConfig, args: CliCreateArgs) -> Result<()> {
    let result = ec_scaffold::run(config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = EcConfig;
    init_logging(&config);

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => create(&config, create_args).await,
        Some(Command::List(list_args)) => {
            let root = config.template_dir(list_args.template_dir.as_deref());
            let catalog = TemplateCatalog::load(&root)?;
            ec_scaffold::templates::print_catalog(&catalog, &root);
            Ok(())
        }
        // No subcommand provided, default to create behavior
        None => create(&config, args.create).await,
    }
}
