//! Placeholder tokens and their replacement values
//!
//! Template text marks placeholders with `{{name}}` delimiters. Keys are
//! applied in insertion order and every occurrence is replaced.

use crate::options::TemplateMode;
use crate::tables::GeneratorTables;

pub const GAME_NAME: &str = "{{gameName}}";
pub const TEMPLATE_NAME: &str = "{{templateName}}";
pub const TEMPLATE_MODULE_NAME: &str = "{{templateModuleName}}";
pub const GAME_FILE: &str = "{{gameFile}}";
pub const AGENT_FILE: &str = "{{agentFile}}";

/// What a token's value denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Plain text (project name, template name)
    Name,
    /// A path relative to the project root
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub value: String,
    pub kind: TokenKind,
}

/// Ordered placeholder -> value map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    tokens: Vec<Token>,
}

/// Values the project tokens are built from
#[derive(Debug, Clone, Copy)]
pub struct TokenValues<'a> {
    pub game_name: &'a str,
    pub template_name: &'a str,
    pub template_display_name: &'a str,
    pub mode: TemplateMode,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token. Later tokens are applied after earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>, kind: TokenKind) {
        self.tokens.push(Token {
            key: key.into(),
            value: value.into(),
            kind,
        });
    }

    /// Tokens of a generated project. Path tokens resolve to bare file names,
    /// or to names under `path_prefix` when one is given.
    pub fn for_project(
        values: TokenValues<'_>,
        tables: &GeneratorTables,
        path_prefix: Option<&str>,
    ) -> Self {
        let qualify = |file: String| match path_prefix {
            Some(prefix) => format!("{}/{}", prefix, file),
            None => file,
        };

        let mut map = Self::new();
        map.insert(GAME_NAME, values.game_name, TokenKind::Name);
        map.insert(TEMPLATE_NAME, values.template_name, TokenKind::Name);
        map.insert(
            TEMPLATE_MODULE_NAME,
            values.template_display_name,
            TokenKind::Name,
        );
        map.insert(GAME_FILE, qualify(tables.game_file(values.mode)), TokenKind::Path);
        map.insert(AGENT_FILE, qualify(tables.agent_file(values.mode)), TokenKind::Path);
        map
    }

    /// Only the tokens of one kind, in the same order
    pub fn of_kind(&self, kind: TokenKind) -> Self {
        Self {
            tokens: self.tokens.iter().filter(|t| t.kind == kind).cloned().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replace every occurrence of every key, in declaration order
    pub fn apply(&self, content: &str) -> String {
        self.tokens
            .iter()
            .fold(content.to_string(), |text, token| text.replace(&token.key, &token.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(mode: TemplateMode) -> TokenValues<'static> {
        TokenValues {
            game_name: "my-game",
            template_name: "piximoroxel8ai",
            template_display_name: "PixiMoroxel8AI",
            mode,
        }
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let map = TokenMap::for_project(
            values(TemplateMode::TypeScript),
            &GeneratorTables::default(),
            None,
        );
        let out = map.apply("# {{gameName}}\n\nWelcome to {{gameName}}, built on {{templateModuleName}}.");
        assert_eq!(out, "# my-game\n\nWelcome to my-game, built on PixiMoroxel8AI.");
    }

    #[test]
    fn test_path_tokens_bare_or_prefixed() {
        let tables = GeneratorTables::default();
        let bare = TokenMap::for_project(values(TemplateMode::JavaScript), &tables, None);
        assert_eq!(bare.apply("./{{gameFile}}"), "./game.js");

        let nested = TokenMap::for_project(values(TemplateMode::TypeScript), &tables, Some("src"));
        assert_eq!(nested.apply("./{{agentFile}}"), "./src/agent.ts");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let map = TokenMap::for_project(
            values(TemplateMode::TypeScript),
            &GeneratorTables::default(),
            Some("src"),
        );
        let once = map.apply("{{gameName}} {{templateName}} {{gameFile}} {{agentFile}} game.ts");
        assert_eq!(map.apply(&once), once);
    }

    #[test]
    fn test_of_kind_keeps_order() {
        let map = TokenMap::for_project(
            values(TemplateMode::TypeScript),
            &GeneratorTables::default(),
            None,
        );
        let keys: Vec<_> = map.of_kind(TokenKind::Path).iter().map(|t| t.key.clone()).collect();
        assert_eq!(keys, vec![GAME_FILE, AGENT_FILE]);

        let names = map.of_kind(TokenKind::Name);
        assert_eq!(names.apply("{{gameFile}}"), "{{gameFile}}");
    }

    #[test]
    fn test_keys_are_not_substrings_of_each_other() {
        let keys = [GAME_NAME, TEMPLATE_NAME, TEMPLATE_MODULE_NAME, GAME_FILE, AGENT_FILE];
        for a in keys {
            for b in keys {
                if a != b {
                    assert!(!a.contains(b), "{} contains {}", a, b);
                }
            }
        }
    }
}
