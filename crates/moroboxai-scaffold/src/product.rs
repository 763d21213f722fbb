//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to tell the shared workflow where its
//! templates live and how to talk about itself.

use crate::options::PackageManager;
use std::path::{Path, PathBuf};

/// Configuration of a scaffolding CLI
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template used when none is requested
    fn default_template(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template directory shipped with the binary
    fn bundled_template_dir(&self) -> PathBuf;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, package_manager: PackageManager, installed: bool) -> Vec<String>;

    /// Template directory to use: explicit path, then the env override, then the bundled one
    fn template_dir(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var_os(self.template_dir_env()).map(PathBuf::from))
            .unwrap_or_else(|| self.bundled_template_dir())
    }
}
