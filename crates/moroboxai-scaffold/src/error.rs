//! Error types for project generation
//!
//! Every stage of a run fails fast with one of these variants. The engine does
//! not roll back: whatever was written to the project root before the failure
//! stays there.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while materializing a project
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The template catalog could not be read or does not contain the request
    #[error("Template catalog error: {0}")]
    Catalog(String),

    /// A copy pattern failed to compile
    #[error("Invalid copy pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Walking a template tree or copying one of its files failed
    #[error("Failed to copy {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing a whitelisted text file failed
    #[error("Failed to substitute placeholders in {}: {source}", path.display())]
    Substitute {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating the nested source directory or moving a file into it failed
    #[error("Failed to relocate {}: {source}", path.display())]
    Relocate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serializing or writing package.json failed
    #[error("Failed to write project manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// The requested example could not be downloaded or unpacked
    #[error(transparent)]
    Example(#[from] ExampleError),

    /// The package manager could not install the dependencies
    #[error(transparent)]
    Install(#[from] InstallError),
}

impl GenerateError {
    /// Name of the stage that produced this error
    pub fn stage(&self) -> &'static str {
        match self {
            GenerateError::Catalog(_) => "catalog",
            GenerateError::Pattern { .. } => "plan",
            GenerateError::Copy { .. } => "copy",
            GenerateError::Substitute { .. } => "substitute",
            GenerateError::Relocate { .. } => "relocate",
            GenerateError::Manifest { .. } => "manifest",
            GenerateError::Example(_) => "example",
            GenerateError::Install(_) => "install",
        }
    }

    /// True when the failure came from missing network connectivity
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            GenerateError::Install(InstallError::Connectivity { .. })
                | GenerateError::Example(ExampleError::Connectivity { .. })
        )
    }
}

/// Errors raised by the installer gateway
#[derive(Error, Debug)]
pub enum InstallError {
    /// The install failed while the machine appeared to be offline
    #[error("`{command}` failed: the package registry is unreachable")]
    Connectivity { command: String },

    /// The package manager exited with a non-zero status
    #[error("`{command}` has failed (exit code {code})")]
    Failed { command: String, code: i32 },

    /// The package manager could not be started at all
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// The command line that was attempted
    pub fn command(&self) -> &str {
        match self {
            InstallError::Connectivity { command }
            | InstallError::Failed { command, .. }
            | InstallError::Spawn { command, .. } => command,
        }
    }
}

/// Errors raised while fetching an example project
#[derive(Error, Debug)]
pub enum ExampleError {
    /// The example is neither a plain name nor a GitHub tree URL
    #[error("Invalid example '{example}': {reason}")]
    InvalidSource { example: String, reason: String },

    /// GitHub could not be reached
    #[error("Could not download {url}: {message}")]
    Connectivity { url: String, message: String },

    /// GitHub answered, but not with the archive
    #[error("Could not download {url}: HTTP {status}")]
    NotFound { url: String, status: u16 },

    /// The downloaded archive is not a readable zip
    #[error("Invalid example archive: {message}")]
    Archive { message: String },

    /// The archive has no files under the example path
    #[error("No example found at '{path}'")]
    Empty { path: String },

    /// Writing an extracted file failed
    #[error("Failed to extract {}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExampleError {
    /// Whether retrying with the bundled template makes sense
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ExampleError::Connectivity { .. })
    }
}

pub type GenerateResult<T> = Result<T, GenerateError>;
