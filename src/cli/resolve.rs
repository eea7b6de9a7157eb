//! `resolve` command: print the destination of every resource.

use anyhow::Result;
use serde::Serialize;

use super::ManifestArgs;
use super::common::{print_json, run_pass};
use crate::config::SiteConfig;
use crate::resource::{Resource, ResourceKind, SiteMap};

/// One output row, in manifest order.
#[derive(Debug, Serialize)]
struct ResolvedEntry<'a> {
    path: &'a str,
    destination: &'a str,
    #[serde(flatten)]
    kind: &'a ResourceKind,
}

impl<'a> From<&'a Resource> for ResolvedEntry<'a> {
    fn from(resource: &'a Resource) -> Self {
        Self {
            path: &resource.path,
            destination: &resource.destination_path,
            kind: &resource.kind,
        }
    }
}

fn entries(sitemap: &SiteMap) -> Vec<ResolvedEntry<'_>> {
    sitemap.resources().iter().map(ResolvedEntry::from).collect()
}

pub fn run_resolve(args: &ManifestArgs, config: &SiteConfig) -> Result<()> {
    let (_, sitemap) = run_pass(args, config)?;
    print_json(&entries(&sitemap), args.pretty)
}
