//! Fixed configuration tables read by the engine
//!
//! These are plain immutable values passed into [`crate::generator::Generator`];
//! nothing in the engine reads ambient state.

use crate::options::TemplateMode;

/// Package names requested for every project, grouped by the flag that adds them
#[derive(Debug, Clone)]
pub struct DependencyTable {
    /// Always installed, before the template package
    pub base: &'static [&'static str],
    /// Added for statically typed projects
    pub typed: &'static [&'static str],
    /// Added when the lint config is shipped
    pub lint: &'static [&'static str],
    /// Added when the format config is shipped
    pub format: &'static [&'static str],
}

/// Every fixed name and list the engine works with
#[derive(Debug, Clone)]
pub struct GeneratorTables {
    /// Source file name -> destination file name
    pub renames: &'static [(&'static str, &'static str)],
    /// Source name of the lint config in template trees
    pub lint_config: &'static str,
    /// Source name of the format config in template trees
    pub format_config: &'static str,
    /// Stem of the game source file (`game.js` / `game.ts`)
    pub game_stem: &'static str,
    /// Stem of the agent source file (`agent.js` / `agent.ts`)
    pub agent_stem: &'static str,
    /// Entry page, after renaming
    pub entry_page: &'static str,
    /// Documentation file, after renaming
    pub readme: &'static str,
    /// Build/header descriptor read by the player
    pub header: &'static str,
    /// Nested source directory name
    pub nested_dir: &'static str,
    /// Files moved into the nested source directory, for both modes
    pub relocated: &'static [&'static str],
    /// Path alias in the type config, before and after relocation
    pub type_config_alias: (&'static str, &'static str),
    pub dependencies: DependencyTable,
}

impl GeneratorTables {
    pub fn game_file(&self, mode: TemplateMode) -> String {
        format!("{}.{}", self.game_stem, mode.extension())
    }

    pub fn agent_file(&self, mode: TemplateMode) -> String {
        format!("{}.{}", self.agent_stem, mode.extension())
    }
}

impl Default for GeneratorTables {
    fn default() -> Self {
        Self {
            renames: &[
                ("gitignore", ".gitignore"),
                ("eslintrc.json", ".eslintrc.json"),
                ("prettierrc.json", ".prettierrc"),
                ("README-template.md", "README.md"),
                ("index-template.html", "index.html"),
            ],
            lint_config: "eslintrc.json",
            format_config: "prettierrc.json",
            game_stem: "game",
            agent_stem: "agent",
            entry_page: "index.html",
            readme: "README.md",
            header: "header.yml",
            nested_dir: "src",
            relocated: &["agent.ts", "agent.js", "game.ts", "game.js"],
            type_config_alias: (r#""@/*": ["./*"]"#, r#""@/*": ["./src/*"]"#),
            dependencies: DependencyTable {
                base: &[
                    "vite",
                    "moroboxai-game-sdk",
                    "moroboxai-player-web",
                    "moroboxai-editor-web",
                ],
                typed: &["typescript"],
                lint: &["eslint", "eslint-config-next"],
                format: &["prettier"],
            },
        }
    }
}
