//! Command-line interface module.

mod args;
pub mod build;
pub mod color;
pub mod readme;

pub use args::{Cli, Commands};
