//! Runtime detection for Node.js and the package managers

use crate::options::PackageManager;
use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    pub fn describe(&self) -> String {
        if self.available {
            format!("{} ({})", self.name, self.version.as_deref().unwrap_or("unknown"))
        } else {
            format!("{} (not installed)", self.name)
        }
    }
}

/// Run `<program> --version` and report what was found
fn query_version(program: &str, name: &'static str) -> RuntimeInfo {
    match Command::new(program).arg("--version").output() {
        Ok(out) if out.status.success() => RuntimeInfo {
            name,
            version: Some(String::from_utf8_lossy(&out.stdout).trim().to_string()),
            available: true,
        },
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    query_version("node", "Node.js")
}

/// Check if a package manager is available
pub fn check_package_manager(package_manager: PackageManager) -> RuntimeInfo {
    query_version(package_manager.name(), package_manager.name())
}

/// Check everything an install with this package manager needs.
/// Bun runs without Node.js; every other manager needs it.
pub fn check_runtimes(package_manager: PackageManager) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    if package_manager != PackageManager::Bun {
        let node = check_node();
        if !node.available {
            missing.push("Node.js (install from https://nodejs.org)".to_string());
        }
        results.push(node);
    }

    let manager = check_package_manager(package_manager);
    if !manager.available {
        missing.push(format!("{} (not found in PATH)", package_manager.name()));
    }
    results.push(manager);

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}
