//! Installer gateway
//!
//! The engine hands its dependency list to an [`Installer`]. The default
//! implementation shells out to the selected package manager and streams its
//! output. No timeout is applied: an install takes as long as the network needs.

use crate::error::InstallError;
use crate::options::PackageManager;
use colored::Colorize;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Settings of one install call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallFlags {
    pub package_manager: PackageManager,
    pub is_online: bool,
}

/// Fetches and registers dependencies for a project root
pub trait Installer {
    fn install(
        &self,
        root: &Path,
        dependencies: &[String],
        flags: InstallFlags,
    ) -> impl Future<Output = Result<(), InstallError>> + Send;
}

/// Arguments passed to the package manager.
/// No dependencies means installing what package.json already declares.
pub fn install_args(dependencies: &[String], flags: InstallFlags) -> Vec<String> {
    let mut args: Vec<String> = match flags.package_manager {
        _ if dependencies.is_empty() => vec!["install".to_string()],
        PackageManager::Npm => ["install", "--save-exact", "--loglevel", "error"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        PackageManager::Yarn | PackageManager::Pnpm | PackageManager::Bun => {
            vec!["add".to_string(), "--exact".to_string()]
        }
    };

    // Only yarn can fall back to its local cache
    if !flags.is_online && flags.package_manager == PackageManager::Yarn {
        args.push("--offline".to_string());
    }

    args.extend(dependencies.iter().cloned());
    args
}

/// Installs through the package manager's CLI
#[derive(Debug, Clone, Default)]
pub struct PackageManagerInstaller;

impl PackageManagerInstaller {
    pub fn new() -> Self {
        Self
    }
}

impl Installer for PackageManagerInstaller {
    async fn install(
        &self,
        root: &Path,
        dependencies: &[String],
        flags: InstallFlags,
    ) -> Result<(), InstallError> {
        let program = flags.package_manager.name();
        let args = install_args(dependencies, flags);
        let command = format!("{} {}", program, args.join(" "));

        if !flags.is_online {
            println!("{}", "You appear to be offline.".yellow());
            if flags.package_manager == PackageManager::Yarn {
                println!("{}", "Falling back to the local Yarn cache.".yellow());
            }
            println!();
        }

        println!("{} {}", "Running:".dimmed(), command.yellow());
        println!();

        let mut child = TokioCommand::new(program)
            .args(&args)
            .current_dir(root)
            .env("ADBLOCK", "1")
            .env("NODE_ENV", "development")
            .env("DISABLE_OPENCOLLECTIVE", "1")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| InstallError::Spawn {
                command: command.clone(),
                source: e,
            })?;

        if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
            let mut stdout_reader = BufReader::new(stdout).lines();
            let mut stderr_reader = BufReader::new(stderr).lines();
            let mut stdout_done = false;
            let mut stderr_done = false;

            while !(stdout_done && stderr_done) {
                tokio::select! {
                    line = stdout_reader.next_line(), if !stdout_done => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => stdout_done = true,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_done = true;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if !stderr_done => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_done = true,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_done = true;
                            }
                        }
                    }
                }
            }
        }

        let status = child.wait().await.map_err(|e| InstallError::Spawn {
            command: command.clone(),
            source: e,
        })?;
        println!();

        if status.success() {
            Ok(())
        } else if !flags.is_online {
            Err(InstallError::Connectivity { command })
        } else {
            Err(InstallError::Failed {
                command,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}
