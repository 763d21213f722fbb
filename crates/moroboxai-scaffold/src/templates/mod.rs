//! Template catalog, copy planning, and copying
//!
//! This module provides:
//! - Template manifest types (RootManifest, TemplateManifest) and the on-disk catalog
//! - Source/destination path resolution for a template and mode
//! - Copy planning from feature flags (glob include/exclude patterns)
//! - File renaming applied while copying
//! - Layered copying of the shared tree and the mode tree
//! - Version compatibility checking
//! - Example projects downloaded from GitHub

pub mod copier;
pub mod example;
pub mod manifest;
pub mod paths;
pub mod planner;
pub mod renamer;
pub mod version;

pub use copier::copy_layers;
pub use example::{ExampleDownloader, ExampleSource, HttpDownloader, RepoInfo};
pub use manifest::{RootManifest, TemplateCatalog, TemplateManifest};
pub use paths::{source_layers, template_file};
pub use planner::{plan, CompiledSpec, CopySpec};
pub use renamer::Renamer;
pub use version::check_compatibility;
