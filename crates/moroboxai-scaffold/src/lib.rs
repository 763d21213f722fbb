//! MoroboxAI Scaffold - Project generation engine for MoroboxAI games
//!
//! This library materializes a new game project from a template tree on disk.
//! A run copies the template's shared and mode-specific files, substitutes
//! placeholders, optionally moves the game sources under `src/`, writes a
//! `package.json`, and hands the dependency list to an installer. A project
//! can also start from an example downloaded from GitHub.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Copy planning, layered copying, substitution, relocation
//! - **Layer 2: Workflow Orchestration** - [`Generator`] driving the stages in order, and
//!   the `ProductConfig` trait describing the binary
//! - **Layer 3: CLI Interface** - Optional cliclack-based progress output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based progress output
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use moroboxai_scaffold::{Generator, GeneratorTables, PackageManagerInstaller, TemplateCatalog};
//!
//! let catalog = TemplateCatalog::load(&template_dir).await?;
//! let generator = Generator::new(catalog, GeneratorTables::default());
//! let materialized = generator.generate(&options, &PackageManagerInstaller::new()).await?;
//! ```

pub mod error;
pub mod generator;
pub mod options;
pub mod product;
pub mod project;
pub mod runtime;
pub mod tables;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ExampleError, GenerateError, GenerateResult, InstallError};
pub use generator::{ExampleProject, Generator, Materialized, Project};
pub use options::{FeatureFlags, GenerateOptions, PackageManager, TemplateMode};
pub use product::ProductConfig;
pub use runtime::{check_runtimes, InstallFlags, Installer, PackageManagerInstaller, RuntimeInfo};
pub use tables::{DependencyTable, GeneratorTables};
pub use templates::{
    ExampleDownloader, ExampleSource, HttpDownloader, RootManifest, TemplateCatalog,
    TemplateManifest,
};

#[cfg(feature = "tui")]
pub use tui::run;
