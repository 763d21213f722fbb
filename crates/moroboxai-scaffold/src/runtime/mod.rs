//! Runtime detection and the installer gateway
//!
//! This module provides:
//! - Node.js and package manager detection
//! - The registry reachability check
//! - The [`Installer`] trait and its package-manager implementation

pub mod check;
pub mod install;
pub mod online;

pub use check::{check_node, check_package_manager, check_runtimes, RuntimeInfo};
pub use install::{InstallFlags, Installer, PackageManagerInstaller};
pub use online::is_online;
