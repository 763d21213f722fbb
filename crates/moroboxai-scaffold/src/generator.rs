//! Project generation workflow
//!
//! Stages run strictly in order against the project root:
//!
//! 1. plan the copy patterns from the feature flags
//! 2. copy the shared tree, then the mode tree (renaming as files land)
//! 3. substitute placeholders in the whitelisted text files
//! 4. relocate game sources into the nested directory, when requested
//! 5. write package.json and assemble the dependency list
//! 6. hand the dependencies to the installer
//!
//! A project can also start from a downloaded example instead of a template.
//! [`Generator::create`] lets the caller fall back to the template when the
//! example cannot be fetched for lack of connectivity.
//!
//! The run is not transactional. Every stage fails fast and nothing written
//! before a failure is removed; callers get an error naming the failing stage
//! and a partially populated directory.

use crate::error::{ExampleError, GenerateError, GenerateResult};
use crate::options::GenerateOptions;
use crate::project::package::{self, PackageJson};
use crate::project::relocate::{self, final_location};
use crate::project::substitute::{self, substitution_targets};
use crate::project::tokens::{TokenKind, TokenMap, TokenValues};
use crate::runtime::install::{InstallFlags, Installer};
use crate::tables::GeneratorTables;
use crate::templates::manifest::{TemplateCatalog, TemplateManifest};
use crate::templates::paths::{source_layers, template_file};
use crate::templates::renamer::Renamer;
use crate::templates::example::{extract_example, ExampleDownloader, ExampleSource};
use crate::templates::{copier, planner};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Everything a run produced before the install step
#[derive(Debug, Clone)]
pub struct Materialized {
    /// Manifest of the template that was used
    pub template: TemplateManifest,
    /// Project-relative paths of the files in their final locations
    pub files: Vec<PathBuf>,
    pub package: PackageJson,
    /// De-duplicated dependency list, in install order
    pub dependencies: Vec<String>,
}

/// A project unpacked from a downloaded example
#[derive(Debug, Clone)]
pub struct ExampleProject {
    pub source: ExampleSource,
    /// Project-relative paths of the extracted files
    pub files: Vec<PathBuf>,
}

/// What [`Generator::create`] produced
#[derive(Debug, Clone)]
pub enum Project {
    Example(ExampleProject),
    Template(Materialized),
}

impl Project {
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Project::Example(example) => &example.files,
            Project::Template(materialized) => &materialized.files,
        }
    }

    /// Packages to add. Empty for examples, which install what their own
    /// package.json declares.
    pub fn dependencies(&self) -> &[String] {
        match self {
            Project::Example(_) => &[],
            Project::Template(materialized) => &materialized.dependencies,
        }
    }
}

/// Materializes projects from a template catalog
#[derive(Debug, Clone)]
pub struct Generator {
    catalog: TemplateCatalog,
    tables: GeneratorTables,
}

impl Generator {
    pub fn new(catalog: TemplateCatalog, tables: GeneratorTables) -> Self {
        Self { catalog, tables }
    }

    /// Run every stage except the install
    pub async fn materialize(&self, options: &GenerateOptions) -> GenerateResult<Materialized> {
        let tables = &self.tables;
        let root = &options.root;
        let mode = options.mode;
        let flags = &options.flags;

        let template = self.catalog.template(&options.template).await?;
        if !template.supports(mode) {
            return Err(GenerateError::Catalog(format!(
                "Template '{}' does not support {}",
                template.name, mode
            )));
        }
        let game_source = template_file(self.catalog.dir(), &options.template, mode, &tables.game_file(mode));
        if !game_source.is_file() {
            return Err(GenerateError::Catalog(format!(
                "Template '{}' has no game source at {}",
                template.name,
                game_source.display()
            )));
        }

        info!("Initializing project with template: {} ({})", template.name, mode);

        // Copy
        let spec = planner::plan(flags, mode, tables);
        debug!("Copy patterns: {:?}", spec.patterns());
        let compiled = spec.compile()?;
        let layers = source_layers(&self.catalog, &options.template, mode)?;
        let renamer = Renamer::new(tables.renames);
        let mut files = copier::copy_layers(&layers, root, &compiled, &renamer).await?;
        info!("Copied {} files into {}", files.len(), root.display());

        // Substitute
        if !flags.agent {
            substitute::inline_default_agent(&root.join(tables.entry_page)).await?;
            substitute::drop_agent_references(&[root.join(tables.header), root.join(tables.readme)])
                .await?;
        }

        let values = TokenValues {
            game_name: &options.project_name,
            template_name: &template.name,
            template_display_name: &template.display_name,
            mode,
        };
        let tokens = TokenMap::for_project(values, tables, None);
        // Path tokens wait for the relocation pass when sources move
        let main_pass = if flags.src_dir {
            tokens.of_kind(TokenKind::Name)
        } else {
            tokens
        };
        let targets = substitution_targets(mode, flags, tables);
        substitute::substitute_files(targets.iter().map(|t| root.join(t)).collect(), &main_pass).await?;
        info!("Substituted placeholders in {} files", targets.len());

        // Relocate
        if flags.src_dir {
            let moved = relocate::relocate(root, tables.nested_dir, tables.relocated).await?;

            let path_tokens = TokenMap::for_project(values, tables, Some(tables.nested_dir))
                .of_kind(TokenKind::Path);
            let relocated_targets = targets
                .iter()
                .map(|t| final_location(root, tables.nested_dir, &moved, t))
                .collect();
            relocate::requalify_references(relocated_targets, &path_tokens).await?;

            let (from, to) = tables.type_config_alias;
            relocate::rewrite_type_config_alias(&root.join(mode.type_config_file()), from, to).await?;

            for file in files.iter_mut() {
                if let Some(name) = file.to_str().filter(|name| moved.iter().any(|m| m == name)) {
                    *file = PathBuf::from(tables.nested_dir).join(name);
                }
            }
            info!("Moved {} files into {}/", moved.len(), tables.nested_dir);
        }

        // Manifest
        let (package, dependencies) = package::build(
            &options.project_name,
            &template.name,
            mode,
            flags,
            &tables.dependencies,
        );
        package::write_package_json(root, &package).await?;
        files.push(PathBuf::from(package::PACKAGE_JSON));
        files.sort();

        Ok(Materialized {
            template,
            files,
            package,
            dependencies,
        })
    }

    /// Download an example and unpack it into the project root
    pub async fn materialize_example<D: ExampleDownloader>(
        &self,
        downloader: &D,
        source: &ExampleSource,
        options: &GenerateOptions,
    ) -> GenerateResult<ExampleProject> {
        let repo = source.repo();
        let url = repo.archive_url()?;
        info!("Downloading example {} from {}", source, url);
        let archive = downloader.download(&url).await?;

        let root = options.root.clone();
        let files = tokio::task::spawn_blocking(move || extract_example(&archive, &repo.path, &root))
            .await
            .map_err(|e| ExampleError::Archive {
                message: e.to_string(),
            })??;
        info!("Extracted {} files into {}", files.len(), options.root.display());

        Ok(ExampleProject {
            source: source.clone(),
            files,
        })
    }

    /// Create the project from the example when one is given, else from the
    /// template. When the example fails for lack of connectivity, `fall_back`
    /// decides whether the template is used instead.
    pub async fn create<D, F>(
        &self,
        options: &GenerateOptions,
        example: Option<&ExampleSource>,
        downloader: &D,
        fall_back: F,
    ) -> GenerateResult<Project>
    where
        D: ExampleDownloader,
        F: FnOnce(&ExampleError) -> bool,
    {
        let Some(source) = example else {
            return Ok(Project::Template(self.materialize(options).await?));
        };

        match self.materialize_example(downloader, source, options).await {
            Ok(example) => Ok(Project::Example(example)),
            Err(GenerateError::Example(e)) if e.is_connectivity() => {
                if !fall_back(&e) {
                    return Err(e.into());
                }
                warn!("Using template '{}' instead of example {}: {}", options.template, source, e);
                Ok(Project::Template(self.materialize(options).await?))
            }
            Err(e) => Err(e),
        }
    }

    /// Hand the dependency list to the installer.
    /// An empty list installs what the project's package.json already declares.
    pub async fn install<I: Installer>(
        &self,
        installer: &I,
        options: &GenerateOptions,
        dependencies: &[String],
    ) -> GenerateResult<()> {
        info!("Installing {} dependencies with {}", dependencies.len(), options.package_manager);
        let flags = InstallFlags {
            package_manager: options.package_manager,
            is_online: options.is_online,
        };
        installer.install(&options.root, dependencies, flags).await?;
        Ok(())
    }

    /// Materialize the project, then install its dependencies unless skipped
    pub async fn generate<I: Installer>(
        &self,
        options: &GenerateOptions,
        installer: &I,
    ) -> GenerateResult<Materialized> {
        let materialized = self.materialize(options).await?;
        if options.skip_install {
            debug!("Skipping install");
        } else {
            self.install(installer, options, &materialized.dependencies).await?;
        }
        Ok(materialized)
    }
}
