//! The finalized options record handed to the engine
//!
//! Everything in here is resolved before generation starts (from CLI flags and
//! defaults) and never changes during a run.

use std::fmt;
use std::path::PathBuf;

/// Language flavor of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateMode {
    JavaScript,
    TypeScript,
}

impl TemplateMode {
    /// Directory name of this mode inside a template
    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateMode::JavaScript => "js",
            TemplateMode::TypeScript => "ts",
        }
    }

    /// Extension of source files written in this mode
    pub fn extension(&self) -> &'static str {
        self.dir_name()
    }

    /// Name of the type-config file shipped with this mode
    pub fn type_config_file(&self) -> &'static str {
        match self {
            TemplateMode::JavaScript => "jsconfig.json",
            TemplateMode::TypeScript => "tsconfig.json",
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, TemplateMode::TypeScript)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateMode::JavaScript => "JavaScript",
            TemplateMode::TypeScript => "TypeScript",
        }
    }

    /// Parse a mode from its short or long name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "js" | "javascript" => Some(TemplateMode::JavaScript),
            "ts" | "typescript" => Some(TemplateMode::TypeScript),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Optional artifacts of a generated project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Ship an eslint config
    pub lint: bool,
    /// Ship a prettier config
    pub format: bool,
    /// Ship a default agent next to the game
    pub agent: bool,
    /// Move game and agent sources under `src/`
    pub src_dir: bool,
}

impl FeatureFlags {
    /// All 16 flag combinations, in a stable order
    pub fn all() -> impl Iterator<Item = FeatureFlags> {
        (0u8..16).map(|bits| FeatureFlags {
            lint: bits & 1 != 0,
            format: bits & 2 != 0,
            agent: bits & 4 != 0,
            src_dir: bits & 8 != 0,
        })
    }
}

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Executable name
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Detect the package manager that launched us from `npm_config_user_agent`
    pub fn detect() -> Self {
        std::env::var("npm_config_user_agent")
            .map(|agent| Self::from_user_agent(&agent))
            .unwrap_or(PackageManager::Npm)
    }

    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.starts_with("yarn") {
            PackageManager::Yarn
        } else if user_agent.starts_with("pnpm") {
            PackageManager::Pnpm
        } else if user_agent.starts_with("bun") {
            PackageManager::Bun
        } else {
            PackageManager::Npm
        }
    }

    /// Command that runs a package script
    pub fn run_command(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            PackageManager::Bun => format!("bun run {}", script),
            PackageManager::Pnpm | PackageManager::Yarn => format!("{} {}", self.name(), script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Finalized input of a generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Name written into package.json and the placeholders
    pub project_name: String,
    /// Absolute path of the project root
    pub root: PathBuf,
    /// Template identifier (directory name in the catalog)
    pub template: String,
    pub mode: TemplateMode,
    pub flags: FeatureFlags,
    pub package_manager: PackageManager,
    pub is_online: bool,
    /// Stop after writing package.json
    pub skip_install: bool,
}

const BLACKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];
const MAX_NAME_LENGTH: usize = 214;

/// Check a project name against the npm package naming rules.
/// Returns the list of problems when the name is not usable.
pub fn validate_project_name(name: &str) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
        return Err(problems);
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }
    if BLACKLISTED_NAMES.contains(&name.to_lowercase().as_str()) {
        problems.push(format!("{} is a blacklisted name", name));
    }
    if name.len() > MAX_NAME_LENGTH {
        problems.push(format!(
            "name can no longer contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if name.to_lowercase() != name {
        problems.push("name can no longer contain capital letters".to_string());
    }
    if name.contains(['~', '\'', '!', '(', ')', '*']) {
        problems.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    let url_safe = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '!' | '*' | '\'' | '(' | ')'))
    };
    let safe = match name.strip_prefix('@').and_then(|scoped| scoped.split_once('/')) {
        Some((scope, package)) => url_safe(scope) && url_safe(package),
        None => url_safe(name),
    };
    if !safe {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_files() {
        assert_eq!(TemplateMode::TypeScript.dir_name(), "ts");
        assert_eq!(TemplateMode::JavaScript.type_config_file(), "jsconfig.json");
        assert_eq!(TemplateMode::TypeScript.type_config_file(), "tsconfig.json");
        assert!(TemplateMode::TypeScript.is_typed());
        assert!(!TemplateMode::JavaScript.is_typed());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(TemplateMode::parse("TS"), Some(TemplateMode::TypeScript));
        assert_eq!(TemplateMode::parse("javascript"), Some(TemplateMode::JavaScript));
        assert_eq!(TemplateMode::parse("rust"), None);
    }

    #[test]
    fn test_all_flag_combinations_are_distinct() {
        let all: Vec<_> = FeatureFlags::all().collect();
        assert_eq!(all.len(), 16);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_package_manager_from_user_agent() {
        assert_eq!(
            PackageManager::from_user_agent("yarn/1.22.19 npm/? node/v18.12.0 linux x64"),
            PackageManager::Yarn
        );
        assert_eq!(
            PackageManager::from_user_agent("pnpm/8.6.0 npm/? node/v18.12.0"),
            PackageManager::Pnpm
        );
        assert_eq!(PackageManager::from_user_agent("bun/1.0.0"), PackageManager::Bun);
        assert_eq!(
            PackageManager::from_user_agent("npm/9.5.0 node/v18.12.0"),
            PackageManager::Npm
        );
    }

    #[test]
    fn test_run_command() {
        assert_eq!(PackageManager::Npm.run_command("dev"), "npm run dev");
        assert_eq!(PackageManager::Yarn.run_command("dev"), "yarn dev");
        assert_eq!(PackageManager::Bun.run_command("dev"), "bun run dev");
    }

    #[test]
    fn test_valid_project_names() {
        assert!(validate_project_name("my-game").is_ok());
        assert!(validate_project_name("game.v2").is_ok());
        assert!(validate_project_name("@scope/my-game").is_ok());
    }

    #[test]
    fn test_invalid_project_names() {
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name(".hidden").is_err());
        assert!(validate_project_name("_private").is_err());
        assert!(validate_project_name("node_modules").is_err());
        assert!(validate_project_name("My-Game").is_err());
        assert!(validate_project_name("my game").is_err());

        let problems = validate_project_name("Bad Name").unwrap_err();
        assert!(problems.iter().any(|p| p.contains("capital letters")));
        assert!(problems.iter().any(|p| p.contains("URL-friendly")));
    }
}
