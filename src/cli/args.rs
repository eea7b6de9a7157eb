//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Blog article permalink resolver for tola sites
#[derive(Parser, Debug, Clone)]
#[command(name = "tola-blog", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tola.toml)
    #[arg(short = 'C', long, global = true, default_value = "tola.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve destination paths for every resource in a manifest
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ManifestArgs,
    },

    /// List articles, newest first
    #[command(visible_alias = "a")]
    Articles {
        #[command(flatten)]
        args: ManifestArgs,
    },

    /// Show one article by its source path
    Article {
        #[command(flatten)]
        args: ManifestArgs,

        /// Source path of the article, e.g. `posts/2023-07-04-hello.html`
        path: String,
    },

    /// List articles grouped by tag
    #[command(visible_alias = "t")]
    Tags {
        #[command(flatten)]
        args: ManifestArgs,
    },

    /// Validate the config and show the compiled source patterns
    #[command(visible_alias = "c")]
    Check,
}

/// Arguments shared by the manifest-driven commands.
#[derive(clap::Args, Debug, Clone)]
pub struct ManifestArgs {
    /// JSON resource manifest: `[{ "path": ..., "date"?, "slug"?, "tags"? }]`
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub manifest: PathBuf,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
