//! tola-blog - blog article permalink resolution for tola sites.

mod blog;
mod cli;
mod config;
mod core;
mod logger;
mod resource;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Resolve { args } => cli::resolve::run_resolve(args, &config),
        Commands::Articles { args } => cli::articles::run_articles(args, &config),
        Commands::Article { args, path } => cli::articles::run_article(args, path, &config),
        Commands::Tags { args } => cli::articles::run_tags(args, &config),
        Commands::Check => cli::check::run_check(&config),
    }
}
