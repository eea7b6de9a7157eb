//! Sitemap resources as seen by the blog.
//!
//! The host owns the resource list. Upstream collaborators fill in
//! [`FrontMatter`]; the blog pass only writes `destination_path` and `kind`.
//!
//! # Resource kinds
//!
//! ```text
//! posts/2023-07-04-hello.html        -> Article     (date, slug, tags)
//! posts/2023-07-04-hello/page2.html  -> SubResource (owner + trailing path)
//! about.html                         -> Plain       (untouched)
//! ```

mod manifest;

pub use manifest::load_manifest;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::utils::date::DateTimeUtc;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Lookup key for a source path: leading slashes are not significant.
#[inline]
pub fn path_key(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Metadata supplied by upstream collaborators (front matter parsing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub date: Option<DateTimeUtc>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

/// Resolved article attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleMeta {
    pub date: DateTimeUtc,
    pub slug: String,
    pub tags: Vec<String>,
}

/// What the blog pass decided a resource is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Not a blog resource.
    #[default]
    Plain,
    /// A full blog article.
    Article(ArticleMeta),
    /// A resource living under an article's subdirectory.
    SubResource {
        /// Source path of the owning article.
        owner: String,
        /// Matched trailing path, including its leading `/`.
        trailing: String,
    },
}

impl ResourceKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Article(_) => "article",
            Self::SubResource { .. } => "sub-resource",
        }
    }
}

/// A single sitemap resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Source path (e.g. `posts/2023-07-04-hello.html`).
    pub path: String,
    /// Output path; starts out equal to `path`.
    pub destination_path: String,
    pub front: FrontMatter,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            destination_path: path.clone(),
            path,
            front: FrontMatter::default(),
            kind: ResourceKind::Plain,
        }
    }

    pub fn with_front(mut self, front: FrontMatter) -> Self {
        self.front = front;
        self
    }
}

/// Path lookup into the host's resource registry.
///
/// Lookups are keyed on original source paths, never on destination paths.
pub trait ResourceLookup {
    fn find_resource_by_path(&self, path: &str) -> Option<&Resource>;
}

/// The host's resource registry for one build pass.
#[derive(Debug, Default)]
pub struct SiteMap {
    resources: Vec<Resource>,
    by_path: FxHashMap<String, usize>,
}

impl SiteMap {
    /// Build a sitemap. On duplicate source paths the last entry wins the lookup.
    pub fn new(resources: Vec<Resource>) -> Self {
        let by_path = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (path_key(&r.path).to_owned(), i))
            .collect();
        Self { resources, by_path }
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Mutable access to one resource by position.
    pub fn resource_mut(&mut self, index: usize) -> Option<&mut Resource> {
        self.resources.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceLookup for SiteMap {
    fn find_resource_by_path(&self, path: &str) -> Option<&Resource> {
        self.by_path
            .get(path_key(path))
            .and_then(|&i| self.resources.get(i))
    }
}
