//! Copy planning: which template files make it into the project
//!
//! A [`CopySpec`] is an ordered list of glob patterns. It always starts with
//! the universal `**` include; every optional artifact disabled by a flag
//! appends a `!`-prefixed exclusion. Exclusions always win over includes, so
//! appending never changes what earlier patterns excluded.

use crate::error::{GenerateError, GenerateResult};
use crate::options::{FeatureFlags, TemplateMode};
use crate::tables::GeneratorTables;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Pattern matching every file of a template tree
pub const INCLUDE_ALL: &str = "**";

/// Ordered include/exclude patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySpec {
    patterns: Vec<String>,
}

impl CopySpec {
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Compile the patterns into matchers
    pub fn compile(&self) -> GenerateResult<CompiledSpec> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();

        for pattern in &self.patterns {
            let (builder, glob) = match pattern.strip_prefix('!') {
                Some(negated) => (&mut exclude, negated),
                None => (&mut include, pattern.as_str()),
            };
            builder.add(Glob::new(glob).map_err(|e| GenerateError::Pattern {
                pattern: pattern.clone(),
                source: e,
            })?);
        }

        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|e| GenerateError::Pattern {
                pattern: self.patterns.join(" "),
                source: e,
            })
        };

        Ok(CompiledSpec {
            include: build(include)?,
            exclude: build(exclude)?,
        })
    }
}

/// Matchers built from a [`CopySpec`]
#[derive(Debug, Clone)]
pub struct CompiledSpec {
    include: GlobSet,
    exclude: GlobSet,
}

impl CompiledSpec {
    /// Whether a template-relative path is copied
    pub fn is_included(&self, relative: &Path) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }
}

/// Build the copy patterns for a set of flags.
/// The same copy spec is applied to every source layer of a template.
pub fn plan(flags: &FeatureFlags, mode: TemplateMode, tables: &GeneratorTables) -> CopySpec {
    let mut patterns = vec![INCLUDE_ALL.to_string()];

    if !flags.lint {
        patterns.push(format!("!{}", tables.lint_config));
    }
    if !flags.format {
        patterns.push(format!("!{}", tables.format_config));
    }
    if !flags.agent {
        patterns.push(format!("!{}", tables.agent_file(mode)));
    }

    CopySpec { patterns }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> GeneratorTables {
        GeneratorTables::default()
    }

    #[test]
    fn test_all_flags_on_includes_everything() {
        let flags = FeatureFlags {
            lint: true,
            format: true,
            agent: true,
            src_dir: true,
        };
        let spec = plan(&flags, TemplateMode::TypeScript, &tables());
        assert_eq!(spec.patterns(), ["**"]);
    }

    #[test]
    fn test_disabled_flags_append_exclusions() {
        let spec = plan(&FeatureFlags::default(), TemplateMode::TypeScript, &tables());
        assert_eq!(
            spec.patterns(),
            ["**", "!eslintrc.json", "!prettierrc.json", "!agent.ts"]
        );

        let spec = plan(&FeatureFlags::default(), TemplateMode::JavaScript, &tables());
        assert!(spec.patterns().iter().any(|p| p == "!agent.js"));
    }

    #[test]
    fn test_universal_include_always_first() {
        for flags in FeatureFlags::all() {
            let spec = plan(&flags, TemplateMode::JavaScript, &tables());
            assert_eq!(spec.patterns()[0], INCLUDE_ALL);
            assert!(spec.patterns()[1..].iter().all(|p| p.starts_with('!')));
        }
    }

    #[test]
    fn test_exclusions_win_over_include() {
        let spec = plan(&FeatureFlags::default(), TemplateMode::TypeScript, &tables())
            .compile()
            .unwrap();

        assert!(spec.is_included(Path::new("game.ts")));
        assert!(spec.is_included(Path::new("assets/bunny.png")));
        assert!(!spec.is_included(Path::new("eslintrc.json")));
        assert!(!spec.is_included(Path::new("prettierrc.json")));
        assert!(!spec.is_included(Path::new("agent.ts")));
    }

    #[test]
    fn test_exclusions_only_match_top_level() {
        let spec = plan(&FeatureFlags::default(), TemplateMode::TypeScript, &tables())
            .compile()
            .unwrap();
        assert!(spec.is_included(Path::new("docs/agent.ts")));
    }

    #[test]
    fn test_enabled_flag_keeps_artifact() {
        let flags = FeatureFlags {
            lint: true,
            ..FeatureFlags::default()
        };
        let spec = plan(&flags, TemplateMode::TypeScript, &tables()).compile().unwrap();
        assert!(spec.is_included(Path::new("eslintrc.json")));
        assert!(!spec.is_included(Path::new("prettierrc.json")));
    }
}
