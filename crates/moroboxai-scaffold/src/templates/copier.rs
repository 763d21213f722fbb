//! Layered template copying
//!
//! Each source layer is copied in its own pass. Files inside a pass are copied
//! concurrently; the next pass starts only when every copy of the previous one
//! has finished, so a later layer always overwrites an earlier one on a
//! destination collision.

use crate::error::{GenerateError, GenerateResult};
use crate::templates::paths::destination_path;
use crate::templates::planner::CompiledSpec;
use crate::templates::renamer::Renamer;
use log::debug;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// Maximum number of files copied at the same time within a pass
const MAX_CONCURRENT_COPIES: usize = 8;

/// A single planned copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyJob {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// List the files of one layer that the copy spec includes, with their destinations
pub fn plan_layer(
    layer: &Path,
    target_dir: &Path,
    spec: &CompiledSpec,
    renamer: &Renamer,
) -> GenerateResult<Vec<CopyJob>> {
    let mut jobs = Vec::new();

    for entry in WalkDir::new(layer).sort_by_file_name() {
        let entry = entry.map_err(|e| GenerateError::Copy {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| layer.to_path_buf()),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(layer)
            .map_err(|e| GenerateError::Copy {
                path: entry.path().to_path_buf(),
                source: io::Error::other(e),
            })?;

        if !spec.is_included(relative) {
            debug!("Skipping excluded file {}", relative.display());
            continue;
        }

        jobs.push(CopyJob {
            source: entry.path().to_path_buf(),
            target: destination_path(target_dir, relative, renamer),
        });
    }

    Ok(jobs)
}

async fn copy_file(job: CopyJob) -> GenerateResult<()> {
    if let Some(parent) = job.target.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| GenerateError::Copy {
                path: parent.to_path_buf(),
                source: e,
            })?;
    }

    debug!("Copying {} -> {}", job.source.display(), job.target.display());
    fs::copy(&job.source, &job.target)
        .await
        .map(|_| ())
        .map_err(|e| GenerateError::Copy {
            path: job.source.clone(),
            source: e,
        })
}

/// Copy every job concurrently and wait for all of them.
/// The first failure aborts the jobs still in flight.
async fn run_pass(jobs: Vec<CopyJob>) -> GenerateResult<()> {
    let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_COPIES));
    let mut tasks = JoinSet::new();

    for job in jobs {
        let permits = permits.clone();
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.map_err(|e| GenerateError::Copy {
                path: job.source.clone(),
                source: io::Error::other(e),
            })?;
            copy_file(job).await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| GenerateError::Copy {
            path: PathBuf::new(),
            source: io::Error::other(e),
        })??;
    }

    Ok(())
}

/// Copy the source layers into the target directory, in order.
/// Returns the project-relative paths of every file written.
pub async fn copy_layers(
    layers: &[PathBuf],
    target_dir: &Path,
    spec: &CompiledSpec,
    renamer: &Renamer,
) -> GenerateResult<Vec<PathBuf>> {
    fs::create_dir_all(target_dir)
        .await
        .map_err(|e| GenerateError::Copy {
            path: target_dir.to_path_buf(),
            source: e,
        })?;

    let mut written = BTreeSet::new();

    for layer in layers {
        let jobs = plan_layer(layer, target_dir, spec, renamer)?;
        debug!("Copying {} files from {}", jobs.len(), layer.display());

        for job in &jobs {
            if let Ok(relative) = job.target.strip_prefix(target_dir) {
                written.insert(relative.to_path_buf());
            }
        }

        run_pass(jobs).await?;
    }

    Ok(written.into_iter().collect())
}
