//! Source and destination path resolution

use crate::error::{GenerateError, GenerateResult};
use crate::options::TemplateMode;
use crate::templates::manifest::TemplateCatalog;
use crate::templates::renamer::Renamer;
use log::debug;
use std::path::{Path, PathBuf};

/// Root of a template's mode tree, e.g. `templates/piximoroxel8ai/ts`
pub fn template_tree(templates_dir: &Path, template: &str, mode: TemplateMode) -> PathBuf {
    templates_dir.join(template).join(mode.dir_name())
}

/// Path of a file inside a template's mode tree, e.g. `templates/piximoroxel8ai/ts/game.ts`
pub fn template_file(templates_dir: &Path, template: &str, mode: TemplateMode, file: &str) -> PathBuf {
    template_tree(templates_dir, template, mode).join(file)
}

/// Ordered source roots for one template and mode.
/// Later layers override earlier ones when they produce the same destination.
pub fn source_layers(
    catalog: &TemplateCatalog,
    template: &str,
    mode: TemplateMode,
) -> GenerateResult<Vec<PathBuf>> {
    let mut layers = Vec::new();

    let shared = catalog.dir().join(&catalog.root_manifest().shared);
    if shared.is_dir() {
        layers.push(shared);
    } else {
        debug!("No shared tree at {}", shared.display());
    }

    let mode_tree = template_tree(catalog.dir(), template, mode);
    if !mode_tree.is_dir() {
        return Err(GenerateError::Catalog(format!(
            "Template '{}' has no {} tree at {}",
            template,
            mode.display_name(),
            mode_tree.display()
        )));
    }
    layers.push(mode_tree);

    Ok(layers)
}

/// Destination of a template-relative path: the last component is renamed,
/// parent directories are kept as-is.
pub fn destination_path(root: &Path, relative: &Path, renamer: &Renamer) -> PathBuf {
    let renamed = relative
        .file_name()
        .and_then(|n| n.to_str())
        .map(|name| relative.with_file_name(renamer.rename(name)))
        .unwrap_or_else(|| relative.to_path_buf());
    root.join(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::GeneratorTables;

    #[test]
    fn test_template_file() {
        let path = template_file(
            Path::new("templates"),
            "piximoroxel8ai",
            TemplateMode::JavaScript,
            "game.js",
        );
        assert_eq!(path, PathBuf::from("templates/piximoroxel8ai/js/game.js"));
    }

    #[test]
    fn test_destination_renames_file_name_only() {
        let renamer = Renamer::new(GeneratorTables::default().renames);
        let root = Path::new("/tmp/my-game");

        assert_eq!(
            destination_path(root, Path::new("gitignore"), &renamer),
            PathBuf::from("/tmp/my-game/.gitignore")
        );
        assert_eq!(
            destination_path(root, Path::new("assets/gitignore"), &renamer),
            PathBuf::from("/tmp/my-game/assets/.gitignore")
        );
        assert_eq!(
            destination_path(root, Path::new("assets/bunny.png"), &renamer),
            PathBuf::from("/tmp/my-game/assets/bunny.png")
        );
    }

    #[tokio::test]
    async fn test_layers_shared_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("template.yaml"), "templates: [pix]\n").unwrap();
        std::fs::create_dir_all(dir.path().join("shared")).unwrap();
        std::fs::create_dir_all(dir.path().join("pix/ts")).unwrap();

        let catalog = TemplateCatalog::load(dir.path()).await.unwrap();
        let layers = source_layers(&catalog, "pix", TemplateMode::TypeScript).unwrap();
        assert_eq!(layers.len(), 2);
        assert!(layers[0].ends_with("shared"));
        assert!(layers[1].ends_with("pix/ts"));

        let err = source_layers(&catalog, "pix", TemplateMode::JavaScript).unwrap_err();
        assert_eq!(err.stage(), "catalog");
    }
}
