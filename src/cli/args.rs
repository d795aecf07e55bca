//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::color::ManifestColor;

/// Badge generator for shields.io with brand colors and custom fonts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: shields.toml)
    #[arg(short = 'C', long, default_value = "shields.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every badge in the manifest
    #[command(visible_alias = "b")]
    Build {
        /// Render even if the manifest is unchanged since the last run
        #[arg(short, long)]
        force: bool,

        /// Leave the README tables untouched
        #[arg(long)]
        no_readme: bool,
    },

    /// Convert a color and show its nearest CSS name
    #[command(visible_alias = "c")]
    Color {
        /// Color value, e.g. `#4c1`, `64,149,191`, `informational`
        value: String,

        /// Color class of VALUE
        #[arg(long, default_value = "hex", value_parser = clap::builder::PossibleValuesParser::new(ManifestColor::CLASSES))]
        class: String,
    },

    /// Rewrite the README tables from the last build
    #[command(visible_alias = "r")]
    Readme,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
