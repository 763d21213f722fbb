//! In-place placeholder substitution of generated text files
//!
//! Files are rewritten whole. There is no partial-write recovery: a failure
//! while writing one file leaves the files already processed as they are.

use crate::error::{GenerateError, GenerateResult};
use crate::options::{FeatureFlags, TemplateMode};
use crate::project::tokens::{TokenMap, AGENT_FILE};
use crate::tables::GeneratorTables;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::task::JoinSet;

/// Inline agent used by the entry page when the project ships no agent file
pub const DEFAULT_AGENT_SOURCE: &str = r#"value: "function inputs(state) {\n    return {\n        left: false,\n        right: false,\n        up: false,\n        down: false\n    }\n}""#;

/// How the entry page loads the agent file
pub fn agent_url_reference() -> String {
    format!(r#"url: "./{}""#, AGENT_FILE)
}

/// Read a file, transform its content, and write it back
pub(crate) async fn rewrite_file<F>(path: &Path, edit: F) -> io::Result<()>
where
    F: FnOnce(&str) -> String,
{
    let content = fs::read_to_string(path).await?;
    fs::write(path, edit(&content)).await
}

/// Names of the files rewritten with the project tokens, relative to the root
pub fn substitution_targets(
    mode: TemplateMode,
    flags: &FeatureFlags,
    tables: &GeneratorTables,
) -> Vec<String> {
    let mut targets = vec![
        tables.entry_page.to_string(),
        tables.readme.to_string(),
        tables.header.to_string(),
        tables.game_file(mode),
    ];
    if flags.agent {
        targets.push(tables.agent_file(mode));
    }
    targets
}

/// Replace every token of the map in one file
pub async fn substitute(path: &Path, tokens: &TokenMap) -> GenerateResult<()> {
    debug!("Substituting placeholders in {}", path.display());
    rewrite_file(path, |content| tokens.apply(content))
        .await
        .map_err(|e| GenerateError::Substitute {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Substitute a set of independent files concurrently
pub async fn substitute_files(paths: Vec<PathBuf>, tokens: &TokenMap) -> GenerateResult<()> {
    if tokens.is_empty() {
        return Ok(());
    }

    let tokens = Arc::new(tokens.clone());
    let mut tasks = JoinSet::new();
    for path in paths {
        let tokens = tokens.clone();
        tasks.spawn(async move { substitute(&path, &tokens).await });
    }

    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| GenerateError::Substitute {
            path: PathBuf::new(),
            source: io::Error::other(e),
        })??;
    }

    Ok(())
}

/// Point the entry page at the inline default agent instead of an agent file
pub async fn inline_default_agent(entry_page: &Path) -> GenerateResult<()> {
    debug!("Inlining default agent in {}", entry_page.display());
    let reference = agent_url_reference();
    rewrite_file(entry_page, |content| {
        content.replace(&reference, DEFAULT_AGENT_SOURCE)
    })
    .await
    .map_err(|e| GenerateError::Substitute {
        path: entry_page.to_path_buf(),
        source: e,
    })
}

/// Remove every line that mentions the agent file, for projects shipping no agent
pub async fn drop_agent_references(paths: &[PathBuf]) -> GenerateResult<()> {
    for path in paths {
        debug!("Dropping agent references from {}", path.display());
        rewrite_file(path, without_agent_lines)
            .await
            .map_err(|e| GenerateError::Substitute {
                path: path.clone(),
                source: e,
            })?;
    }
    Ok(())
}

fn without_agent_lines(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !line.contains(AGENT_FILE))
        .collect()
}
