//! CLI progress output using cliclack (Charm-style inline logs and spinners)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod create;
#[cfg(feature = "tui")]
pub mod directory;

#[cfg(feature = "tui")]
pub use create::{run, CreateArgs};
