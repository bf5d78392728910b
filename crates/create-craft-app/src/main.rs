//! create-craft-app - Project scaffolding for Craft.js applications

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use craft_core::tui::CreateArgs;
use craft_core::{PackageManager, ProductConfig};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Craft.js product configuration
#[derive(Clone)]
pub struct CraftConfig;

impl ProductConfig for CraftConfig {
    fn name(&self) -> &'static str {
        "create-craft-app"
    }

    fn display_name(&self) -> &'static str {
        "Craft.js"
    }

    fn default_template_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/craftjs-dev/craft/main/templates"
    }

    fn template_url_env(&self) -> &'static str {
        "CRAFT_TEMPLATE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://craftjs.dev"
    }

    fn default_project_name(&self) -> &'static str {
        "my-craft-app"
    }

    fn cli_description(&self) -> &'static str {
        "Create a new Craft.js application"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install create-craft-app --force"
    }

    fn next_steps(&self, project_name: &str, package_manager: PackageManager) -> Vec<String> {
        vec![
            format!("cd {project_name}"),
            "cp .env.example .env".to_string(),
            format!("{} dev", package_manager.run_command()),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-craft-app")]
#[command(about = "Create a new Craft.js application")]
#[command(version)]
pub struct Args {
    /// Name of the project
    pub project_name: Option<String>,

    /// Skip all prompts and use defaults
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Use npm as package manager
    #[arg(long, conflicts_with_all = ["use_yarn", "use_pnpm", "use_bun"])]
    pub use_npm: bool,

    /// Use yarn as package manager
    #[arg(long, conflicts_with_all = ["use_pnpm", "use_bun"])]
    pub use_yarn: bool,

    /// Use pnpm as package manager
    #[arg(long, conflicts_with_all = ["use_bun"])]
    pub use_pnpm: bool,

    /// Use bun as package manager
    #[arg(long)]
    pub use_bun: bool,

    /// Local directory to use for the template instead of fetching from
    /// remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_name: args.project_name,
            package_manager: PackageManager::from_flags(
                args.use_npm,
                args.use_yarn,
                args.use_pnpm,
                args.use_bun,
            ),
            template_dir: args.template_dir,
            yes: args.yes,
        }
    }
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

    let args = Args::parse();
    let config = CraftConfig;

    let result = craft_core::tui::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
