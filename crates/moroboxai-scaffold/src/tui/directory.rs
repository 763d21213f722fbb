//! Target directory checks run before generation

use std::io;
use std::path::Path;

/// Entries that may already exist in a target directory
const TOLERATED_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    "LICENSE",
    "Thumbs.db",
    "docs",
    "mkdocs.yml",
    "npm-debug.log",
    "yarn-debug.log",
    "yarn-error.log",
    "yarnrc.yml",
    ".yarn",
];

fn is_tolerated(name: &str) -> bool {
    TOLERATED_ENTRIES.contains(&name) || name.ends_with(".iml")
}

/// Entries of `dir` that could conflict with generated files, sorted by name.
/// A missing directory has none.
pub fn conflicting_entries(dir: &Path) -> io::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut conflicts = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().to_string();
        if !is_tolerated(&name) {
            conflicts.push(name);
        }
    }
    conflicts.sort();
    Ok(conflicts)
}
