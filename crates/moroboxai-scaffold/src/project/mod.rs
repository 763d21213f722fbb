//! Rewriting a freshly copied project
//!
//! - Placeholder tokens and in-place substitution
//! - Relocation of game sources into a nested directory
//! - package.json and the dependency list

pub mod package;
pub mod relocate;
pub mod substitute;
pub mod tokens;

pub use package::{assemble_dependencies, PackageJson};
pub use relocate::relocate;
pub use substitute::substitute;
pub use tokens::{TokenKind, TokenMap, TokenValues};
