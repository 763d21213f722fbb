//! Template manifest types and parsing

use crate::error::{GenerateError, GenerateResult};
use crate::options::TemplateMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the manifest file at the catalog root and in each template
pub const MANIFEST_FILE: &str = "template.yaml";

fn default_shared_dir() -> String {
    "shared".to_string()
}

/// Root template manifest (templates/template.yaml)
/// Lists available template directories and the tree shared by all of them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,

    /// Directory (relative to the catalog root) copied into every project
    /// before the template's own mode tree
    #[serde(default = "default_shared_dir")]
    pub shared: String,
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Template identifier, also the name of its npm package
    pub name: String,

    /// Human-readable name, substituted for `{{templateModuleName}}`
    pub display_name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Modes this template ships a tree for (`js`, `ts`)
    #[serde(default)]
    pub modes: Vec<String>,
}

impl TemplateManifest {
    /// Check if the template ships a tree for a mode
    pub fn supports(&self, mode: TemplateMode) -> bool {
        self.modes
            .iter()
            .any(|m| TemplateMode::parse(m) == Some(mode))
    }
}

/// A template directory on disk together with its root manifest
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    dir: PathBuf,
    root: RootManifest,
}

impl TemplateCatalog {
    /// Read the root manifest of a template directory
    pub async fn load(dir: impl AsRef<Path>) -> GenerateResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        let manifest_path = dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&manifest_path).await.map_err(|e| {
            GenerateError::Catalog(format!("Failed to read {}: {}", manifest_path.display(), e))
        })?;
        let root: RootManifest = serde_yaml::from_str(&content).map_err(|e| {
            GenerateError::Catalog(format!("Failed to parse {}: {}", manifest_path.display(), e))
        })?;
        Ok(Self { dir, root })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn root_manifest(&self) -> &RootManifest {
        &self.root
    }

    /// Read a template's manifest, failing if the catalog does not list it
    pub async fn template(&self, template: &str) -> GenerateResult<TemplateManifest> {
        if !self.root.templates.iter().any(|t| t == template) {
            return Err(GenerateError::Catalog(format!(
                "Template '{}' not found. Available templates: {}",
                template,
                self.root.templates.join(", ")
            )));
        }

        let manifest_path = self.dir.join(template).join(MANIFEST_FILE);
        let content = fs::read_to_string(&manifest_path).await.map_err(|e| {
            GenerateError::Catalog(format!("Failed to read {}: {}", manifest_path.display(), e))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            GenerateError::Catalog(format!(
                "Failed to parse template '{}' manifest: {}",
                template, e
            ))
        })
    }
}
