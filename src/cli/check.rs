//! `check` command: validate the config and show what it compiles to.

use anyhow::Result;

use crate::blog::Blog;
use crate::config::SiteConfig;
use crate::log;

pub fn run_check(config: &SiteConfig) -> Result<()> {
    let blog = Blog::new(&config.blog)?;
    let template = blog.template();

    if config.has_file() {
        log!("check"; "config {}", config.config_path.display());
    } else {
        log!("check"; "no config file, using defaults");
    }
    log!("check"; "sources    {}", template.source());
    log!("check"; "articles   {}", template.article_pattern());
    match template.subdir_pattern() {
        Some(pattern) => log!("check"; "subdirs    {}", pattern),
        None => log!("check"; "subdirs    (none)"),
    }
    log!("check"; "permalink  {}", blog.permalink());
    log!("check"; "index file {}", config.blog.index_file);

    Ok(())
}
