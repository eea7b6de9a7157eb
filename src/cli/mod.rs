//! Command-line interface module.

mod args;
pub mod articles;
pub mod check;
pub mod common;
pub mod resolve;

pub use args::{Cli, Commands, ManifestArgs};
