//! JSON resource manifest.
//!
//! Stands in for the host's sitemap when running from the command line:
//!
//! ```json
//! [
//!   { "path": "posts/2023-07-04-hello.html", "date": "2023-07-04", "tags": ["rust"] },
//!   { "path": "posts/2023-07-04-hello/page2.html" },
//!   { "path": "about.html" }
//! ]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use super::{FrontMatter, Resource, SiteMap, path_key};

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    path: String,
    #[serde(flatten)]
    front: FrontMatter,
}

/// Load a manifest file into a [`SiteMap`].
pub fn load_manifest(path: &Path) -> Result<SiteMap> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest `{}`", path.display()))?;
    parse_manifest(&content).with_context(|| format!("invalid manifest `{}`", path.display()))
}

/// Parse manifest JSON. Duplicate source paths are rejected.
pub fn parse_manifest(content: &str) -> Result<SiteMap> {
    let entries: Vec<ManifestEntry> = serde_json::from_str(content)?;

    let mut seen = FxHashSet::default();
    let mut resources = Vec::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(path_key(&entry.path).to_owned()) {
            bail!("duplicate resource path `{}`", entry.path);
        }
        resources.push(Resource::new(entry.path).with_front(entry.front));
    }

    Ok(SiteMap::new(resources))
}
