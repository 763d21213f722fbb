//! Charm-style progress output for the create workflow

use crate::error::ExampleError;
use crate::generator::{Generator, Project};
use crate::options::{
    validate_project_name, FeatureFlags, GenerateOptions, PackageManager, TemplateMode,
};
use crate::product::ProductConfig;
use crate::runtime::{check, online, PackageManagerInstaller};
use crate::tables::GeneratorTables;
use crate::templates::{version, ExampleSource, HttpDownloader, TemplateCatalog};
use crate::tui::directory::conflicting_entries;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command.
/// Unset options fall back to the defaults in [`CreateArgs::resolve_flags`].
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Example name or GitHub URL to start from instead of the template
    pub example: Option<String>,

    /// Directory of the example inside its repository
    pub example_path: Option<String>,

    pub mode: Option<TemplateMode>,
    pub lint: Option<bool>,
    pub format: Option<bool>,
    pub agent: Option<bool>,
    pub src_dir: Option<bool>,

    /// Package manager to install with, detected when unset
    pub package_manager: Option<PackageManager>,

    /// Stop after writing package.json
    pub skip_install: bool,
}

impl CreateArgs {
    pub fn resolve_mode(&self) -> TemplateMode {
        self.mode.unwrap_or(TemplateMode::TypeScript)
    }

    pub fn resolve_flags(&self) -> FeatureFlags {
        FeatureFlags {
            lint: self.lint.unwrap_or(true),
            format: self.format.unwrap_or(false),
            agent: self.agent.unwrap_or(false),
            src_dir: self.src_dir.unwrap_or(false),
        }
    }
}

/// Run the create workflow, reporting progress on the terminal
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve and validate the project directory
    let project_dir = resolve_directory(config, &args)?;
    let project_name = project_name(&project_dir)?;
    let example = args
        .example
        .as_deref()
        .filter(|e| *e != "default")
        .map(|e| ExampleSource::parse(e, args.example_path.as_deref()))
        .transpose()?;

    // Step 2: Load the template catalog
    let template_dir = config.template_dir(args.template_dir.clone());
    let catalog = TemplateCatalog::load(&template_dir)
        .await
        .with_context(|| format!("Failed to load templates from {}", template_dir.display()))?;
    let template_id = args
        .template
        .clone()
        .unwrap_or_else(|| config.default_template().to_string());
    let manifest = catalog.template(&template_id).await?;

    if let Some(warning) =
        version::check_compatibility(cli_version, &manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    let mode = args.resolve_mode();
    let flags = args.resolve_flags();
    cliclack::log::info(format!(
        "Template: {} ({}) - {}",
        manifest.display_name, mode, manifest.description
    ))?;

    // Step 3: Check the package manager
    let package_manager = args.package_manager.unwrap_or_else(PackageManager::detect);
    cliclack::log::info(format!("Using {}.", package_manager))?;

    let is_online = if args.skip_install {
        true
    } else {
        check_runtimes(package_manager)?;

        let spinner = cliclack::spinner();
        spinner.start("Checking registry...");
        let online = online::is_online().await;
        spinner.stop(if online {
            "Registry reachable"
        } else {
            "Registry unreachable"
        });
        online
    };

    // Step 4: Create project
    let options = GenerateOptions {
        project_name,
        root: project_dir.clone(),
        template: template_id,
        mode,
        flags,
        package_manager,
        is_online,
        skip_install: args.skip_install,
    };
    let generator = Generator::new(catalog, GeneratorTables::default());

    match &example {
        Some(source) => cliclack::log::step(format!("Downloading example {}...", source))?,
        None => cliclack::log::step("Creating project...")?,
    }
    let downloader = HttpDownloader::new(config.name());
    let project = generator
        .create(&options, example.as_ref(), &downloader, confirm_template_fallback)
        .await
        .map_err(|e| anyhow::anyhow!("{} stage failed: {}", e.stage(), e))?;
    cliclack::log::success(format!(
        "Created {} files in {}",
        project.files().len(),
        project_dir.display()
    ))?;

    // Step 5: Install dependencies
    let mut installed = false;
    if !options.skip_install {
        let message = match &project {
            Project::Example(_) => "Installing packages from package.json".to_string(),
            Project::Template(materialized) => format!(
                "Installing dependencies:\n{}",
                materialized
                    .dependencies
                    .iter()
                    .map(|d| format!("- {}", d))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        };
        cliclack::log::info(message)?;

        match generator
            .install(&PackageManagerInstaller::new(), &options, project.dependencies())
            .await
        {
            Ok(()) => {
                cliclack::log::success("Dependencies installed")?;
                installed = true;
            }
            Err(e) if e.is_connectivity() => {
                cliclack::log::warning(format!(
                    "{}\nThe project was created; install its dependencies once you are online.",
                    e
                ))?;
            }
            Err(e) => anyhow::bail!("{} stage failed: {}", e.stage(), e),
        }
    }

    // Step 6: Show next steps
    print_next_steps(config, &project_dir, package_manager, installed)?;

    Ok(())
}

/// Ask whether to use the bundled template after a failed example download
fn confirm_template_fallback(reason: &ExampleError) -> bool {
    let _ = cliclack::log::warning(reason.to_string());
    cliclack::confirm(
        "Could not download the example because of a connectivity issue between your machine and GitHub.\n\
         Do you want to use the default template instead?",
    )
    .initial_value(true)
    .interact()
    .unwrap_or(false)
}

fn resolve_directory<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<PathBuf> {
    let dir = match &args.directory {
        Some(dir) => dir.clone(),
        None => anyhow::bail!(
            "Please specify the project directory:\n  {} <project-directory>\n\
             For example:\n  {} my-moroboxai-game",
            config.name(),
            config.name()
        ),
    };

    let current_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let path = if dir.is_absolute() {
        dir
    } else {
        current_dir.join(dir)
    };
    cliclack::log::info(format!("Using directory: {}", path.display()))?;

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    let conflicts = conflicting_entries(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !conflicts.is_empty() {
        anyhow::bail!(
            "The directory {} contains files that could conflict:\n{}\n\
             Either try using a new directory name, or remove the files listed above.",
            path.display(),
            conflicts
                .iter()
                .map(|c| format!("  - {}", c))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(path)
}

fn project_name(project_dir: &Path) -> Result<String> {
    let name = project_dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid project directory: {}", project_dir.display()))?
        .to_string();

    if let Err(problems) = validate_project_name(&name) {
        anyhow::bail!(
            "Could not create a project called \"{}\" because of npm naming restrictions:\n{}",
            name,
            problems
                .iter()
                .map(|p| format!("  * {}", p))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(name)
}

fn check_runtimes(package_manager: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes(package_manager) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes.iter().map(|r| r.describe()).collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing runtimes or rerun with --skip-install.");
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    package_manager: PackageManager,
    installed: bool,
) -> Result<()> {
    let steps = config.next_steps(project_dir, package_manager, installed);

    println!();
    println!("  {}", console::style("Next steps").bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, console::style(step).cyan());
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
