//! Example projects downloaded from GitHub
//!
//! An example is either a name from the official examples directory or a
//! GitHub tree URL (`https://github.com/<owner>/<repo>/tree/<branch>/<path>`).
//! The whole branch is fetched as a zip archive from codeload and only the
//! files under the example path are extracted into the project root.

use crate::error::ExampleError;
use log::debug;
use std::fmt;
use std::future::Future;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use url::Url;
use zip::ZipArchive;

/// Repository holding the official examples
pub const OFFICIAL_OWNER: &str = "moroboxai";
pub const OFFICIAL_REPO: &str = "create-moroboxai-game";
pub const OFFICIAL_BRANCH: &str = "main";
pub const OFFICIAL_EXAMPLES_DIR: &str = "examples";

const ARCHIVE_HOST: &str = "https://codeload.github.com";

/// A branch and directory inside a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub name: String,
    pub branch: String,
    /// Directory of the example inside the repository, empty for the root
    pub path: String,
}

impl RepoInfo {
    /// Zip archive of the whole branch
    pub fn archive_url(&self) -> Result<Url, ExampleError> {
        let invalid = |reason: &str| ExampleError::InvalidSource {
            example: format!("{}/{}", self.owner, self.name),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(ARCHIVE_HOST).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("archive URL cannot have path segments"))?
            .pop_if_empty()
            .extend([self.owner.as_str(), self.name.as_str(), "zip", "refs", "heads"])
            .extend(self.branch.split('/'));
        Ok(url)
    }
}

/// Where an example comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleSource {
    /// Directory name under the official examples directory
    Named(String),
    GitHub(RepoInfo),
}

impl ExampleSource {
    /// Parse a `--example` value. `example_path` overrides the directory
    /// inside the repository, which lets branch names contain slashes.
    pub fn parse(example: &str, example_path: Option<&str>) -> Result<Self, ExampleError> {
        let example = example.trim();
        match Url::parse(example) {
            Ok(url) => repo_from_url(example, &url, example_path).map(ExampleSource::GitHub),
            Err(_) => {
                if example.is_empty() || example.contains(['/', '\\']) || example.starts_with('.') {
                    return Err(ExampleError::InvalidSource {
                        example: example.to_string(),
                        reason: "expected an example name or a GitHub URL".to_string(),
                    });
                }
                Ok(ExampleSource::Named(example.to_string()))
            }
        }
    }

    /// Repository, branch and directory to fetch
    pub fn repo(&self) -> RepoInfo {
        match self {
            ExampleSource::Named(name) => RepoInfo {
                owner: OFFICIAL_OWNER.to_string(),
                name: OFFICIAL_REPO.to_string(),
                branch: OFFICIAL_BRANCH.to_string(),
                path: format!("{}/{}", OFFICIAL_EXAMPLES_DIR, name),
            },
            ExampleSource::GitHub(repo) => repo.clone(),
        }
    }
}

impl fmt::Display for ExampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExampleSource::Named(name) => write!(f, "{}", name),
            ExampleSource::GitHub(repo) => {
                write!(f, "{}/{}@{}", repo.owner, repo.name, repo.branch)?;
                if !repo.path.is_empty() {
                    write!(f, ":{}", repo.path)?;
                }
                Ok(())
            }
        }
    }
}

fn repo_from_url(example: &str, url: &Url, example_path: Option<&str>) -> Result<RepoInfo, ExampleError> {
    let invalid = |reason: &str| ExampleError::InvalidSource {
        example: example.to_string(),
        reason: reason.to_string(),
    };

    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => return Err(invalid("only GitHub URLs are supported")),
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    let (owner, name) = match segments.as_slice() {
        [owner, name, ..] => (owner.to_string(), name.trim_end_matches(".git").to_string()),
        _ => return Err(invalid("expected https://github.com/<owner>/<repo>")),
    };

    let example_path = example_path
        .map(|p| p.trim_matches('/').to_string())
        .filter(|p| !p.is_empty());

    let (branch, path) = match segments.get(2) {
        None => (OFFICIAL_BRANCH.to_string(), String::new()),
        Some(&"tree") => {
            let rest = segments[3..].join("/");
            if rest.is_empty() {
                return Err(invalid("missing branch after /tree/"));
            }
            match example_path {
                Some(path) => {
                    let branch = rest
                        .strip_suffix(&format!("/{}", path))
                        .map(str::to_string)
                        .unwrap_or(rest);
                    (branch, path)
                }
                None => {
                    let branch = segments[3].to_string();
                    (branch, segments[4..].join("/"))
                }
            }
        }
        Some(_) => return Err(invalid("expected a /tree/<branch> URL")),
    };

    Ok(RepoInfo {
        owner,
        name,
        branch,
        path,
    })
}

/// Fetches example archives
pub trait ExampleDownloader {
    fn download(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, ExampleError>> + Send;
}

/// Downloads archives over HTTPS
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    /// Create a downloader with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl ExampleDownloader for HttpDownloader {
    async fn download(&self, url: &Url) -> Result<Vec<u8>, ExampleError> {
        debug!("Downloading {}", url);
        let connectivity = |e: reqwest::Error| ExampleError::Connectivity {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(connectivity)?;

        if !response.status().is_success() {
            return Err(ExampleError::NotFound {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.bytes().await.map_err(connectivity)?.to_vec())
    }
}

/// Extract the files under `example_path` into `root`.
///
/// Archive entries are nested under one top-level directory
/// (`<repo>-<branch>/`), which is stripped first. Entries escaping the archive
/// are ignored. Returns the written paths relative to `root`, sorted.
pub fn extract_example(archive: &[u8], example_path: &str, root: &Path) -> Result<Vec<PathBuf>, ExampleError> {
    let mut archive = ZipArchive::new(Cursor::new(archive)).map_err(|e| ExampleError::Archive {
        message: e.to_string(),
    })?;
    let prefix = PathBuf::from(example_path.trim_matches('/'));

    let mut files = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| ExampleError::Archive {
            message: e.to_string(),
        })?;
        if file.is_dir() {
            continue;
        }
        let Some(name) = file.enclosed_name() else {
            debug!("Skipping unsafe archive entry {}", file.name());
            continue;
        };

        let mut components = name.components();
        components.next();
        let Ok(relative) = components.as_path().strip_prefix(&prefix) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let relative = relative.to_path_buf();

        let target = root.join(&relative);
        let extract_error = |source| ExampleError::Extract {
            path: target.clone(),
            source,
        };
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(extract_error)?;
        }
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(extract_error)?;
        std::fs::write(&target, contents).map_err(extract_error)?;

        debug!("Extracted {}", relative.display());
        files.push(relative);
    }

    if files.is_empty() {
        return Err(ExampleError::Empty {
            path: example_path.to_string(),
        });
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, content) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_named_example_uses_official_repo() {
        let source = ExampleSource::parse("pong", None).unwrap();
        assert_eq!(source, ExampleSource::Named("pong".to_string()));
        let repo = source.repo();
        assert_eq!(repo.path, "examples/pong");
        assert_eq!(
            repo.archive_url().unwrap().as_str(),
            "https://codeload.github.com/moroboxai/create-moroboxai-game/zip/refs/heads/main"
        );
    }

    #[test]
    fn test_github_tree_url() {
        let source =
            ExampleSource::parse("https://github.com/someone/games/tree/dev/samples/bunny", None)
                .unwrap();
        assert_eq!(
            source.repo(),
            RepoInfo {
                owner: "someone".to_string(),
                name: "games".to_string(),
                branch: "dev".to_string(),
                path: "samples/bunny".to_string(),
            }
        );
        assert_eq!(source.to_string(), "someone/games@dev:samples/bunny");
    }

    #[test]
    fn test_example_path_allows_slashed_branch() {
        let source = ExampleSource::parse(
            "https://github.com/someone/games/tree/feature/pixel/samples/bunny",
            Some("samples/bunny"),
        )
        .unwrap();
        let repo = source.repo();
        assert_eq!(repo.branch, "feature/pixel");
        assert_eq!(repo.path, "samples/bunny");
        assert_eq!(
            repo.archive_url().unwrap().as_str(),
            "https://codeload.github.com/someone/games/zip/refs/heads/feature/pixel"
        );
    }

    #[test]
    fn test_repository_root_url() {
        let repo = ExampleSource::parse("https://github.com/someone/bunny-game", None)
            .unwrap()
            .repo();
        assert_eq!(repo.branch, "main");
        assert_eq!(repo.path, "");
    }

    #[test]
    fn test_invalid_sources() {
        assert!(ExampleSource::parse("https://gitlab.com/someone/games", None).is_err());
        assert!(ExampleSource::parse("https://github.com/someone/games/blob/main/x", None).is_err());
        assert!(ExampleSource::parse("../escape", None).is_err());
        assert!(ExampleSource::parse("", None).is_err());
    }

    #[test]
    fn test_extract_only_example_files() {
        let bytes = archive(&[
            ("games-main/README.md", "repo readme"),
            ("games-main/samples/bunny/package.json", "{}"),
            ("games-main/samples/bunny/src/game.ts", "game"),
            ("games-main/samples/other/game.ts", "other"),
        ]);
        let root = tempfile::tempdir().unwrap();

        let files = extract_example(&bytes, "samples/bunny", root.path()).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("package.json"), PathBuf::from("src/game.ts")]
        );
        assert_eq!(std::fs::read_to_string(root.path().join("src/game.ts")).unwrap(), "game");
        assert!(!root.path().join("README.md").exists());
    }

    #[test]
    fn test_extract_missing_example_is_empty() {
        let bytes = archive(&[("games-main/samples/other/game.ts", "other")]);
        let root = tempfile::tempdir().unwrap();

        let err = extract_example(&bytes, "samples/bunny", root.path()).unwrap_err();
        assert!(matches!(err, ExampleError::Empty { .. }));
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let root = tempfile::tempdir().unwrap();
        let err = extract_example(b"not a zip", "", root.path()).unwrap_err();
        assert!(matches!(err, ExampleError::Archive { .. }));
    }
}
