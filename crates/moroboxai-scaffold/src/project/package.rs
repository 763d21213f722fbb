//! package.json generation and dependency assembly

use crate::error::{GenerateError, GenerateResult};
use crate::options::{FeatureFlags, TemplateMode};
use crate::tables::DependencyTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const PACKAGE_JSON: &str = "package.json";
pub const INITIAL_VERSION: &str = "0.1.0";

/// Scripts of a generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripts {
    pub dev: String,
    pub build: String,
    pub preview: String,
}

impl Scripts {
    pub fn for_mode(mode: TemplateMode) -> Self {
        let build = if mode.is_typed() {
            "tsc && vite build"
        } else {
            "vite build"
        };
        Self {
            dev: "vite".to_string(),
            build: build.to_string(),
            preview: "vite preview".to_string(),
        }
    }
}

/// The project descriptor written to package.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageJson {
    pub name: String,
    pub version: String,
    pub private: bool,
    pub scripts: Scripts,
}

impl PackageJson {
    pub fn new(game_name: &str, mode: TemplateMode) -> Self {
        Self {
            name: game_name.to_string(),
            version: INITIAL_VERSION.to_string(),
            private: true,
            scripts: Scripts::for_mode(mode),
        }
    }

    /// Pretty JSON with two-space indent and a trailing newline
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self).map(|json| json + "\n")
    }
}

/// Write package.json at the project root
pub async fn write_package_json(root: &Path, package: &PackageJson) -> GenerateResult<PathBuf> {
    let path = root.join(PACKAGE_JSON);
    let json = package.to_json().map_err(|e| GenerateError::Manifest {
        path: path.clone(),
        message: e.to_string(),
    })?;
    fs::write(&path, json)
        .await
        .map_err(|e| GenerateError::Manifest {
            path: path.clone(),
            message: e.to_string(),
        })?;
    Ok(path)
}

/// Ordered, de-duplicated list of packages to install.
///
/// Base packages come first, then the template package, then the packages
/// added by the mode and each enabled flag. The first occurrence of a name wins.
pub fn assemble_dependencies(
    template: &str,
    mode: TemplateMode,
    flags: &FeatureFlags,
    table: &DependencyTable,
) -> Vec<String> {
    let mut requested: Vec<&str> = table.base.to_vec();
    requested.push(template);

    if mode.is_typed() {
        requested.extend(table.typed);
    }
    if flags.lint {
        requested.extend(table.lint);
    }
    if flags.format {
        requested.extend(table.format);
    }

    let mut seen = HashSet::new();
    requested
        .into_iter()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Build the descriptor and the dependency list of a project
pub fn build(
    game_name: &str,
    template: &str,
    mode: TemplateMode,
    flags: &FeatureFlags,
    table: &DependencyTable,
) -> (PackageJson, Vec<String>) {
    (
        PackageJson::new(game_name, mode),
        assemble_dependencies(template, mode, flags, table),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::GeneratorTables;

    fn table() -> DependencyTable {
        GeneratorTables::default().dependencies
    }

    #[test]
    fn test_package_json_shape() {
        let package = PackageJson::new("bunny-run", TemplateMode::TypeScript);
        let json = package.to_json().unwrap();
        assert_eq!(
            json,
            "{\n  \"name\": \"bunny-run\",\n  \"version\": \"0.1.0\",\n  \"private\": true,\n  \
             \"scripts\": {\n    \"dev\": \"vite\",\n    \"build\": \"tsc && vite build\",\n    \
             \"preview\": \"vite preview\"\n  }\n}\n"
        );
    }

    #[test]
    fn test_scripts_differ_only_by_build_tool() {
        let js = Scripts::for_mode(TemplateMode::JavaScript);
        let ts = Scripts::for_mode(TemplateMode::TypeScript);
        assert_eq!(js.dev, ts.dev);
        assert_eq!(js.preview, ts.preview);
        assert_eq!(js.build, "vite build");
        assert_eq!(ts.build, "tsc && vite build");
    }

    #[test]
    fn test_typed_with_lint_without_format() {
        let flags = FeatureFlags {
            lint: true,
            ..FeatureFlags::default()
        };
        let deps = assemble_dependencies("piximoroxel8ai", TemplateMode::TypeScript, &flags, &table());
        assert_eq!(
            deps,
            vec![
                "vite",
                "moroboxai-game-sdk",
                "moroboxai-player-web",
                "moroboxai-editor-web",
                "piximoroxel8ai",
                "typescript",
                "eslint",
                "eslint-config-next",
            ]
        );
    }

    #[test]
    fn test_untyped_without_flags() {
        let deps = assemble_dependencies(
            "piximoroxel8ai",
            TemplateMode::JavaScript,
            &FeatureFlags::default(),
            &table(),
        );
        assert!(!deps.iter().any(|d| d == "typescript" || d == "eslint" || d == "prettier"));
        assert_eq!(deps.last().map(String::as_str), Some("piximoroxel8ai"));
    }

    #[test]
    fn test_duplicates_removed_first_seen_kept() {
        let table = DependencyTable {
            base: &["vite", "typescript"],
            typed: &["typescript"],
            lint: &["eslint", "vite"],
            format: &["prettier"],
        };
        let flags = FeatureFlags {
            lint: true,
            format: true,
            ..FeatureFlags::default()
        };
        let deps = assemble_dependencies("vite", TemplateMode::TypeScript, &flags, &table);
        assert_eq!(deps, vec!["vite", "typescript", "eslint", "prettier"]);
    }

    #[test]
    fn test_no_duplicates_for_any_flags() {
        for flags in FeatureFlags::all() {
            for mode in [TemplateMode::JavaScript, TemplateMode::TypeScript] {
                let deps = assemble_dependencies("piximoroxel8ai", mode, &flags, &table());
                let unique: HashSet<_> = deps.iter().collect();
                assert_eq!(unique.len(), deps.len());
            }
        }
    }

    #[tokio::test]
    async fn test_write_package_json() {
        let dir = tempfile::tempdir().unwrap();
        let (package, _) = build("my-game", "piximoroxel8ai", TemplateMode::JavaScript, &FeatureFlags::default(), &table());
        let path = write_package_json(dir.path(), &package).await.unwrap();

        let written: PackageJson = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, package);
    }
}
