//! Moving game sources into a nested source directory

use crate::error::{GenerateError, GenerateResult};
use crate::project::substitute::{rewrite_file, substitute_files};
use crate::project::tokens::TokenMap;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Move each listed file from `root` into `root/nested_dir`.
///
/// A listed file that does not exist was excluded earlier in the run and is
/// skipped. Any other failure aborts. Returns the names that were moved.
pub async fn relocate(root: &Path, nested_dir: &str, files: &[&str]) -> GenerateResult<Vec<String>> {
    let target_dir = root.join(nested_dir);
    fs::create_dir_all(&target_dir)
        .await
        .map_err(|e| GenerateError::Relocate {
            path: target_dir.clone(),
            source: e,
        })?;

    let mut moved = Vec::new();
    for file in files {
        let from = root.join(file);
        let to = target_dir.join(file);
        match fs::rename(&from, &to).await {
            Ok(()) => {
                debug!("Moved {} -> {}", from.display(), to.display());
                moved.push(file.to_string());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Nothing to move at {}", from.display());
            }
            Err(e) => {
                return Err(GenerateError::Relocate {
                    path: from,
                    source: e,
                })
            }
        }
    }

    Ok(moved)
}

/// Where a root-level file lives after relocation
pub fn final_location(root: &Path, nested_dir: &str, moved: &[String], file: &str) -> PathBuf {
    if moved.iter().any(|m| m == file) {
        root.join(nested_dir).join(file)
    } else {
        root.join(file)
    }
}

/// Second substitution pass: resolve the path tokens, qualified with the
/// nested directory, in files at their post-relocation locations
pub async fn requalify_references(files: Vec<PathBuf>, path_tokens: &TokenMap) -> GenerateResult<()> {
    substitute_files(files, path_tokens)
        .await
        .map_err(|e| match e {
            GenerateError::Substitute { path, source } => GenerateError::Relocate { path, source },
            other => other,
        })
}

/// Rewrite the type-config path alias so `@/` resolves inside the nested directory
pub async fn rewrite_type_config_alias(type_config: &Path, from: &str, to: &str) -> GenerateResult<()> {
    debug!("Rewriting path alias in {}", type_config.display());
    rewrite_file(type_config, |content| content.replace(from, to))
        .await
        .map_err(|e| GenerateError::Relocate {
            path: type_config.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TemplateMode;
    use crate::project::tokens::{TokenKind, TokenValues};
    use crate::tables::GeneratorTables;

    const RELOCATED: &[&str] = &["agent.ts", "agent.js", "game.ts", "game.js"];

    #[tokio::test]
    async fn test_moves_listed_files_and_skips_missing() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("game.ts"), "game").unwrap();
        std::fs::write(root.path().join("index.html"), "page").unwrap();

        let moved = relocate(root.path(), "src", RELOCATED).await.unwrap();

        assert_eq!(moved, vec!["game.ts"]);
        assert!(root.path().join("src/game.ts").exists());
        assert!(!root.path().join("game.ts").exists());
        assert!(!root.path().join("src/agent.ts").exists());
        assert!(root.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_existing_nested_dir_is_reused() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("src")).unwrap();
        std::fs::write(root.path().join("src/keep.txt"), "keep").unwrap();
        std::fs::write(root.path().join("agent.js"), "agent").unwrap();

        let moved = relocate(root.path(), "src", RELOCATED).await.unwrap();
        assert_eq!(moved, vec!["agent.js"]);
        assert!(root.path().join("src/keep.txt").exists());
    }

    #[tokio::test]
    async fn test_nested_dir_blocked_by_file_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("src"), "not a directory").unwrap();

        let err = relocate(root.path(), "src", RELOCATED).await.unwrap_err();
        assert_eq!(err.stage(), "relocate");
    }

    #[test]
    fn test_final_location() {
        let root = Path::new("/game");
        let moved = vec!["game.ts".to_string()];
        assert_eq!(final_location(root, "src", &moved, "game.ts"), PathBuf::from("/game/src/game.ts"));
        assert_eq!(final_location(root, "src", &moved, "index.html"), PathBuf::from("/game/index.html"));
    }

    #[tokio::test]
    async fn test_requalify_references() {
        let root = tempfile::tempdir().unwrap();
        let header = root.path().join("header.yml");
        std::fs::write(&header, "game: {{gameFile}}\nagent: {{agentFile}}\n").unwrap();

        let tokens = TokenMap::for_project(
            TokenValues {
                game_name: "g",
                template_name: "t",
                template_display_name: "T",
                mode: TemplateMode::JavaScript,
            },
            &GeneratorTables::default(),
            Some("src"),
        )
        .of_kind(TokenKind::Path);

        requalify_references(vec![header.clone()], &tokens).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&header).unwrap(),
            "game: src/game.js\nagent: src/agent.js\n"
        );
    }

    #[tokio::test]
    async fn test_rewrite_type_config_alias() {
        let root = tempfile::tempdir().unwrap();
        let config = root.path().join("tsconfig.json");
        std::fs::write(&config, r#"{ "paths": { "@/*": ["./*"] } }"#).unwrap();

        let (from, to) = GeneratorTables::default().type_config_alias;
        rewrite_type_config_alias(&config, from, to).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&config).unwrap(),
            r#"{ "paths": { "@/*": ["./src/*"] } }"#
        );
    }
}
