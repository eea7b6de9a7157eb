//! `articles`, `article` and `tags` commands: views over the article index.

use anyhow::{Result, bail};

use super::ManifestArgs;
use super::common::{print_json, run_pass};
use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural_count;

/// Print articles, newest first.
pub fn run_articles(args: &ManifestArgs, config: &SiteConfig) -> Result<()> {
    let (blog, _) = run_pass(args, config)?;
    print_json(&blog.articles(), args.pretty)
}

/// Print the article whose source path is `path`.
pub fn run_article(args: &ManifestArgs, path: &str, config: &SiteConfig) -> Result<()> {
    let (blog, _) = run_pass(args, config)?;
    match blog.article(path) {
        Some(article) => print_json(article, args.pretty),
        None => bail!("`{path}` is not an article in {}", args.manifest.display()),
    }
}

/// Print articles grouped by tag, tags in lexical order.
pub fn run_tags(args: &ManifestArgs, config: &SiteConfig) -> Result<()> {
    let (blog, _) = run_pass(args, config)?;
    let tags = blog.tags();
    log!("blog"; "{}", plural_count(tags.len(), "tag"));
    print_json(&tags, args.pretty)
}
