//! Source-name to destination-name mapping applied during copy

/// Maps template file names to their names in the generated project.
/// Identity for every name outside the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Renamer {
    rules: &'static [(&'static str, &'static str)],
}

impl Renamer {
    pub fn new(rules: &'static [(&'static str, &'static str)]) -> Self {
        Self { rules }
    }

    /// Destination name of a single file name (not a path)
    pub fn rename<'a>(&self, name: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|(source, _)| *source == name)
            .map(|(_, dest)| *dest)
            .unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::GeneratorTables;
    use std::collections::HashSet;

    fn renamer() -> Renamer {
        Renamer::new(GeneratorTables::default().renames)
    }

    #[test]
    fn test_fixed_rules() {
        let r = renamer();
        assert_eq!(r.rename("gitignore"), ".gitignore");
        assert_eq!(r.rename("eslintrc.json"), ".eslintrc.json");
        assert_eq!(r.rename("prettierrc.json"), ".prettierrc");
        assert_eq!(r.rename("README-template.md"), "README.md");
        assert_eq!(r.rename("index-template.html"), "index.html");
    }

    #[test]
    fn test_other_names_pass_through() {
        let r = renamer();
        assert_eq!(r.rename("game.ts"), "game.ts");
        assert_eq!(r.rename("tsconfig.json"), "tsconfig.json");
        assert_eq!(r.rename(""), "");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let r = renamer();
        for (source, _) in GeneratorTables::default().renames {
            let once = r.rename(source);
            assert_eq!(r.rename(once), once, "rename not idempotent for {}", source);
        }
    }

    #[test]
    fn test_rules_are_injective() {
        let tables = GeneratorTables::default();
        let r = renamer();
        let destinations: HashSet<_> = tables.renames.iter().map(|(s, _)| r.rename(s)).collect();
        assert_eq!(destinations.len(), tables.renames.len());
    }
}
