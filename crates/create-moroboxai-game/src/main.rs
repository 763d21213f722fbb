//! create-moroboxai-game - Project scaffolding for MoroboxAI games

use anyhow::Result;
use clap::Parser;
use moroboxai_scaffold::tui::CreateArgs;
use moroboxai_scaffold::{PackageManager, ProductConfig, TemplateMode};
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MoroboxAI product configuration
#[derive(Clone)]
pub struct MoroboxAIConfig;

impl ProductConfig for MoroboxAIConfig {
    fn name(&self) -> &'static str {
        "create-moroboxai-game"
    }

    fn display_name(&self) -> &'static str {
        "create-moroboxai-game"
    }

    fn default_template(&self) -> &'static str {
        "piximoroxel8ai"
    }

    fn template_dir_env(&self) -> &'static str {
        "MOROBOXAI_TEMPLATE_DIR"
    }

    fn bundled_template_dir(&self) -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates"))
    }

    fn docs_url(&self) -> &'static str {
        "https://moroboxai.github.io"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install create-moroboxai-game --force"
    }

    fn next_steps(&self, dir: &Path, package_manager: PackageManager, installed: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Install if the registry could not be reached
        if !installed {
            steps.push(format!("{} install", package_manager.name()));
        }

        // Step 3: Start the dev server
        steps.push(package_manager.run_command("dev"));

        steps.push(format!("Read the docs at {}", self.docs_url()));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-moroboxai-game")]
#[command(about = "CLI for scaffolding MoroboxAI games")]
#[command(version)]
pub struct Args {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// An example to bootstrap the game with: a name from the official
    /// repository or a GitHub URL
    #[arg(short = 'e', long)]
    pub example: Option<String>,

    /// Path of the example inside its repository, for branches containing a slash
    #[arg(long = "example-path", requires = "example")]
    pub example_path: Option<String>,

    /// Initialize as a TypeScript project (default)
    #[arg(long, conflicts_with = "js")]
    pub ts: bool,

    /// Initialize as a JavaScript project
    #[arg(long)]
    pub js: bool,

    /// Initialize with an eslint config (default)
    #[arg(long, conflicts_with = "no_eslint")]
    pub eslint: bool,

    /// Initialize without an eslint config
    #[arg(long = "no-eslint")]
    pub no_eslint: bool,

    /// Initialize with a prettier config
    #[arg(long)]
    pub prettier: bool,

    /// Initialize with a default agent next to the game
    #[arg(long, conflicts_with = "no_agent")]
    pub agent: bool,

    /// Initialize without an agent file (default)
    #[arg(long = "no-agent")]
    pub no_agent: bool,

    /// Initialize inside a `src/` directory
    #[arg(long = "src-dir", conflicts_with = "no_src_dir")]
    pub src_dir: bool,

    /// Initialize at the project root (default)
    #[arg(long = "no-src-dir")]
    pub no_src_dir: bool,

    /// Bootstrap the game using npm
    #[arg(long = "use-npm", group = "package_manager")]
    pub use_npm: bool,

    /// Bootstrap the game using pnpm
    #[arg(long = "use-pnpm", group = "package_manager")]
    pub use_pnpm: bool,

    /// Bootstrap the game using yarn
    #[arg(long = "use-yarn", group = "package_manager")]
    pub use_yarn: bool,

    /// Bootstrap the game using bun
    #[arg(long = "use-bun", group = "package_manager")]
    pub use_bun: bool,

    /// Create the project without installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Print debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

/// Map a `--flag`/`--no-flag` pair to an explicit choice
fn toggle(on: bool, off: bool) -> Option<bool> {
    if off {
        Some(false)
    } else if on {
        Some(true)
    } else {
        None
    }
}

impl Args {
    fn package_manager(&self) -> Option<PackageManager> {
        if self.use_npm {
            Some(PackageManager::Npm)
        } else if self.use_pnpm {
            Some(PackageManager::Pnpm)
        } else if self.use_yarn {
            Some(PackageManager::Yarn)
        } else if self.use_bun {
            Some(PackageManager::Bun)
        } else {
            None
        }
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        let package_manager = args.package_manager();
        let mode = if args.js {
            Some(TemplateMode::JavaScript)
        } else if args.ts {
            Some(TemplateMode::TypeScript)
        } else {
            None
        };
        CreateArgs {
            directory: args.directory,
            template_dir: args.template_dir,
            template: args.template,
            example: args.example,
            example_path: args.example_path,
            mode,
            lint: toggle(args.eslint, args.no_eslint),
            format: args.prettier.then_some(true),
            agent: toggle(args.agent, args.no_agent),
            src_dir: toggle(args.src_dir, args.no_src_dir),
            package_manager,
            skip_install: args.skip_install,
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

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Off
        })
        .parse_default_env()
        .init();

    let config = MoroboxAIConfig;
    let result = moroboxai_scaffold::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
