//! Charm-style CLI prompts using cliclack

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::product::ProductConfig;
use crate::runtime::check;
use crate::scaffold::package_manager::PackageManager;
use crate::scaffold::{
    name, project, version, ScaffoldRequest, TemplateFetcher, TemplateManifest,
};

/// CLI arguments for the create flow
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name, if given on the command line
    pub project_name: Option<String>,

    /// Package manager resolved from the `--use-*` flags
    pub package_manager: Option<PackageManager>,

    /// Local directory to use for the template instead of fetching from
    /// remote
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Unwrap a prompt result, exiting with code 0 and a cancellation notice
/// when the user cancelled the prompt.
fn or_cancel<T>(result: std::io::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            let _ = cliclack::outro_cancel("Operation cancelled.");
            std::process::exit(0);
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(
        style(format!(" {} ", config.name()))
            .black()
            .on_cyan()
            .to_string(),
    )?;

    // Step 1: Resolve the project name
    let project_name = resolve_project_name(config, &args)?;

    // Step 2: Resolve the package manager
    let package_manager = resolve_package_manager(&args)?;

    // Step 3: Set up the template fetcher
    let mut fetcher = setup_fetcher(config, &args.template_dir)?;

    // Step 4: Load the template manifest
    let manifest = load_template(&mut fetcher).await?;

    // Check version compatibility
    if let Some(warning) =
        version::check_compatibility(cli_version, &manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 5: Preflight runtimes
    check_runtimes(package_manager, args.yes)?;

    // Step 6: Final confirmation
    if !args.yes {
        let confirmed = or_cancel(
            cliclack::confirm(format!(
                "Create {} with {}?",
                style(&project_name).cyan(),
                style(package_manager).cyan()
            ))
            .initial_value(true)
            .interact(),
        )?;

        if !confirmed {
            cliclack::outro_cancel("Operation cancelled.")?;
            std::process::exit(0);
        }
    }

    // Step 7: Create the project
    let request = ScaffoldRequest::new(&project_name, package_manager)?;
    create(config, &mut fetcher, &request).await?;

    // Step 8: Show next steps
    print_next_steps(config, &request)?;

    Ok(())
}

fn resolve_project_name<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<String> {
    if let Some(project_name) = &args.project_name {
        // Non-interactive: a bad name is fatal
        name::validate_project_name(project_name)?;
        return Ok(project_name.clone());
    }

    if args.yes {
        return Ok(config.default_project_name().to_string());
    }

    let project_name: String = or_cancel(
        cliclack::input("What will your project be called?")
            .placeholder(config.default_project_name())
            .default_input(config.default_project_name())
            .validate(|input: &String| match name::project_name_error(input) {
                None => Ok(()),
                Some(message) => Err(message),
            })
            .interact(),
    )?;

    Ok(project_name)
}

fn resolve_package_manager(args: &CreateArgs) -> Result<PackageManager> {
    if let Some(package_manager) = args.package_manager {
        return Ok(package_manager);
    }

    if args.yes {
        return Ok(PackageManager::default());
    }

    let mut select = cliclack::select("Which package manager would you like to use?");
    for pm in PackageManager::ALL {
        let hint = if pm == PackageManager::default() {
            "recommended"
        } else {
            ""
        };
        select = select.item(pm, pm.command(), hint);
    }

    or_cancel(select.initial_value(PackageManager::default()).interact())
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local template from {}", path.display()))?;
            TemplateFetcher::from_local(path.clone(), config.user_agent())
        }
        None => TemplateFetcher::from_config(config)?,
    };

    Ok(fetcher)
}

async fn load_template(fetcher: &mut TemplateFetcher) -> Result<TemplateManifest> {
    let spinner = cliclack::spinner();
    spinner.start("Loading template...");

    match fetcher.fetch_manifest().await {
        Ok(manifest) => {
            spinner.stop(format!(
                "Template: {} - {}",
                manifest.name, manifest.description
            ));
            Ok(manifest)
        }
        Err(e) => {
            spinner.stop("Failed to load template");
            Err(e.into())
        }
    }
}

fn check_runtimes(package_manager: PackageManager, yes: bool) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let report = check::check_environment(package_manager);

    if report.is_ok() {
        let runtime_info: Vec<String> = report
            .detected
            .iter()
            .map(|r| {
                format!(
                    "{} ({})",
                    r.name,
                    r.version.as_deref().unwrap_or("unknown")
                )
            })
            .collect();
        spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
        return Ok(());
    }

    spinner.stop("Missing runtimes");
    for missing in &report.missing {
        cliclack::log::error(format!(
            "{} is not installed ({})",
            missing.name, missing.install_hint
        ))?;
    }

    // Offer the installation docs before bailing
    if !yes {
        if let Some(first) = report.missing.first() {
            let open_docs = or_cancel(
                cliclack::confirm(format!(
                    "Open the {} installation docs in your browser?",
                    first.name
                ))
                .initial_value(false)
                .interact(),
            )?;

            if open_docs {
                open::that(first.docs_url)?;
            }
        }
    }

    anyhow::bail!("Please install the missing runtimes and try again.");
}

async fn create<C: ProductConfig>(
    config: &C,
    fetcher: &mut TemplateFetcher,
    request: &ScaffoldRequest,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start(format!(
        "Creating your {} application...",
        config.display_name()
    ));

    match project::stage_project(fetcher, request).await {
        Ok(copied_files) => {
            spinner.stop(format!(
                "Created {} files in {}",
                copied_files.len(),
                request.target_dir().display()
            ));
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e.into());
        }
    }

    if project::init_repository(request.target_dir()).await {
        cliclack::log::success("Initialized git repository")?;
    } else {
        cliclack::log::info("Skipped git initialization")?;
    }

    cliclack::log::info(format!(
        "Installing dependencies with {}...",
        request.package_manager()
    ))?;
    project::install_dependencies(request).await?;
    cliclack::log::success("Dependencies installed")?;

    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, request: &ScaffoldRequest) -> Result<()> {
    let steps = config.next_steps(request.project_name(), request.package_manager());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!(
        "  {}",
        style(format!("For documentation, visit: {}", config.docs_url())).dim()
    );

    cliclack::outro(
        style(format!("Your {} app is ready!", config.display_name()))
            .green()
            .to_string(),
    )?;

    Ok(())
}
