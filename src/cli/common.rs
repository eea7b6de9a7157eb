//! Common utilities shared across CLI commands.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use super::ManifestArgs;
use crate::blog::Blog;
use crate::config::SiteConfig;
use crate::log;
use crate::resource::{SiteMap, load_manifest};

/// Load the manifest named on the command line and run one blog pass over it.
pub fn run_pass(args: &ManifestArgs, config: &SiteConfig) -> Result<(Blog, SiteMap)> {
    let mut sitemap = load_manifest(&args.manifest)?;
    if sitemap.is_empty() {
        log!("warning"; "manifest {} lists no resources", args.manifest.display());
    }
    let mut blog = Blog::new(&config.blog)?;

    blog.manipulate_resource_list(&mut sitemap)
        .with_context(|| format!("blog pass failed for {}", args.manifest.display()))?;

    Ok((blog, sitemap))
}

/// Write `value` as JSON to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let formatted = to_json(value, pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{formatted}")?;
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let formatted = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(formatted)
}
