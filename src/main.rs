//! shields-plus - shields.io badges with brand colors, flat variants and web-safe fonts.

#![allow(dead_code)]

mod badge;
mod cli;
mod color;
mod config;
mod embed;
mod font;
mod freshness;
mod logger;
mod manifest;
mod readme;
mod svg;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ProjectConfig::load(&cli.config)?;
    debug!("config"; "project root {}", config.root.display());

    match &cli.command {
        Commands::Build { force, no_readme } => {
            cli::build::build_badges(&config, *force, !*no_readme)
        }
        Commands::Color { value, class } => cli::color::show_color(&config, value, class),
        Commands::Readme => cli::readme::update(&config),
    }
}
