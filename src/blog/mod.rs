//! Blog article classification and permalink resolution.
//!
//! # Module Structure
//!
//! ```text
//! blog/
//! ├── template    # Source template -> article / subdirectory matchers
//! ├── classify    # Article / sub-resource / no match
//! ├── permalink   # Permalink substitution, tail rules, normalization
//! ├── index       # Date-sorted and tag-grouped article views
//! ├── error       # BlogError
//! └── mod.rs      # Blog: one pass over the sitemap (this file)
//! ```
//!
//! # Pass
//!
//! ```text
//! SiteMap ──classify──> Article ────────> resolve_article_path ──┐
//!            │                                                   ├─> destination_path
//!            └────────> SubResource ────> resolve_subresource_path┘
//!                                                   │
//!                              articles ──> ArticleIndex (rebuilt)
//! ```
//!
//! Every destination is computed before any resource is written, so a
//! failing pass leaves the sitemap as it was.

mod classify;
mod error;
mod index;
mod permalink;
mod template;

pub use error::BlogError;
pub use index::Article;
pub use template::{CompiledTemplate, Placeholder};

use classify::{Classification, classify};
use index::ArticleIndex;
use permalink::{ArticleFields, resolve_article_path, resolve_subresource_path};

use std::collections::BTreeMap;

use crate::config::BlogConfig;
use crate::core::UrlPath;
use crate::resource::{ArticleMeta, Resource, ResourceKind, SiteMap, path_key};
use crate::utils::date::DateTimeUtc;
use crate::utils::plural_count;
use crate::{debug, log};

/// Counts from one blog pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub articles: usize,
    pub sub_resources: usize,
    pub untouched: usize,
}

/// Pending write for one resource.
struct Update {
    index: usize,
    destination: UrlPath,
    kind: ResourceKind,
}

/// One blog: a compiled source template, a permalink template and the
/// articles found by the last pass.
#[derive(Debug)]
pub struct Blog {
    template: CompiledTemplate,
    permalink: String,
    index_file: String,
    index: ArticleIndex,
}

impl Blog {
    /// Compile the configured templates.
    pub fn new(config: &BlogConfig) -> Result<Self, BlogError> {
        Ok(Self {
            template: CompiledTemplate::compile(&config.sources)?,
            permalink: config.permalink.clone(),
            index_file: config.index_file.clone(),
            index: ArticleIndex::default(),
        })
    }

    pub fn template(&self) -> &CompiledTemplate {
        &self.template
    }

    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    /// All articles, newest first.
    pub fn articles(&self) -> Vec<&Article> {
        self.index.articles()
    }

    /// Tag name to articles, newest first.
    pub fn tags(&self) -> BTreeMap<&str, Vec<&Article>> {
        self.index.tags_index()
    }

    /// Article for a source path, if that path is an article.
    pub fn article(&self, path: &str) -> Option<&Article> {
        self.index.find_article(path)
    }

    /// Classify every resource, write destination paths, and rebuild the index.
    ///
    /// Any error aborts the pass before a single resource is modified.
    pub fn manipulate_resource_list(
        &mut self,
        sitemap: &mut SiteMap,
    ) -> Result<PassSummary, BlogError> {
        let updates = self.plan(sitemap)?;

        let mut summary = PassSummary {
            untouched: sitemap.len() - updates.len(),
            ..PassSummary::default()
        };
        let mut articles = Vec::new();

        for Update {
            index,
            destination,
            kind,
        } in updates
        {
            let Some(resource) = sitemap.resource_mut(index) else {
                continue;
            };
            resource.destination_path = destination.as_str().to_owned();
            match &kind {
                ResourceKind::Article(meta) => {
                    summary.articles += 1;
                    articles.push(Article::new(&resource.path, destination, meta.clone()));
                }
                ResourceKind::SubResource { .. } => summary.sub_resources += 1,
                ResourceKind::Plain => {}
            }
            resource.kind = kind;
        }

        self.index = ArticleIndex::new(articles);

        log!(
            "blog";
            "resolved {}, {}",
            plural_count(summary.articles, "article"),
            plural_count(summary.sub_resources, "sub-resource")
        );
        debug!("blog"; "{} left untouched", plural_count(summary.untouched, "resource"));
        Ok(summary)
    }

    /// Read-only phase: decide every resource's kind and destination.
    fn plan(&self, sitemap: &SiteMap) -> Result<Vec<Update>, BlogError> {
        let mut updates = Vec::new();

        for (index, resource) in sitemap.resources().iter().enumerate() {
            let (destination, kind) = match classify(&resource.path, &self.template, sitemap)? {
                Classification::Article => {
                    let meta = self.article_meta(resource)?;
                    let destination =
                        resolve_article_path(&self.permalink, &ArticleFields::from_meta(&meta));
                    (destination, ResourceKind::Article(meta))
                }
                Classification::SubResource { owner, trailing } => {
                    let meta = self.article_meta(owner)?;
                    let destination = resolve_subresource_path(
                        &self.permalink,
                        &ArticleFields::from_meta(&meta),
                        &trailing,
                        &self.index_file,
                    );
                    let kind = ResourceKind::SubResource {
                        owner: owner.path.clone(),
                        trailing,
                    };
                    (destination, kind)
                }
                Classification::NoMatch => continue,
            };

            debug!("blog"; "{} {} -> {}", kind.label(), resource.path, destination);
            updates.push(Update {
                index,
                destination,
                kind,
            });
        }

        Ok(updates)
    }

    /// Date, slug and tags of an article resource.
    ///
    /// Front matter wins. Otherwise the date comes from the `:year`, `:month`
    /// and `:day` captured out of the path, and the slug from `:title` or,
    /// failing that, the file stem.
    fn article_meta(&self, resource: &Resource) -> Result<ArticleMeta, BlogError> {
        let captures = self
            .template
            .match_article(path_key(&resource.path))
            .unwrap_or_default();

        let date = resource
            .front
            .date
            .or_else(|| {
                DateTimeUtc::from_path_parts(
                    captures.year.as_deref()?,
                    captures.month.as_deref()?,
                    captures.day.as_deref()?,
                )
            })
            .ok_or_else(|| BlogError::MissingDate {
                path: resource.path.clone(),
            })?;

        let slug = resource
            .front
            .slug
            .clone()
            .or(captures.title)
            .unwrap_or_else(|| file_stem(&resource.path).to_owned());

        Ok(ArticleMeta {
            date,
            slug,
            tags: resource.front.tags.clone(),
        })
    }
}

/// File name without directories or extensions: `posts/hello.html.md` -> `hello`.
fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.split('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{FrontMatter, ResourceLookup};

    fn config(sources: &str, permalink: &str) -> BlogConfig {
        BlogConfig {
            sources: sources.into(),
            permalink: permalink.into(),
            ..BlogConfig::default()
        }
    }

    fn dated(path: &str, date: &str, tags: &[&str]) -> Resource {
        Resource::new(path).with_front(FrontMatter {
            date: DateTimeUtc::parse(date),
            slug: None,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        })
    }

    fn destination<'a>(map: &'a SiteMap, path: &str) -> &'a str {
        &map.find_resource_by_path(path).unwrap().destination_path
    }

    #[test]
    fn test_pass_resolves_article() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:month/:title/",
        ))
        .unwrap();
        let mut map = SiteMap::new(vec![dated("/posts/2023-07-04-hello.html", "2023-07-04", &[])]);

        let summary = blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(summary.articles, 1);
        assert_eq!(destination(&map, "posts/2023-07-04-hello.html"), "/2023/07/hello/");
    }

    #[test]
    fn test_front_matter_date_is_authoritative() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:month/:day/:title.html",
        ))
        .unwrap();
        let mut map = SiteMap::new(vec![dated("posts/2023-07-04-hello.html", "2023-09-01", &[])]);

        blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(
            destination(&map, "posts/2023-07-04-hello.html"),
            "/2023/09/01/hello.html"
        );
    }

    #[test]
    fn test_front_matter_slug_wins_over_title() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:title/",
        ))
        .unwrap();
        let resource = Resource::new("posts/2023-07-04-hello.html").with_front(FrontMatter {
            slug: Some("greetings".into()),
            ..FrontMatter::default()
        });
        let mut map = SiteMap::new(vec![resource]);

        blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(destination(&map, "posts/2023-07-04-hello.html"), "/2023/greetings/");
    }

    #[test]
    fn test_date_falls_back_to_path() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:month/:day/:title/",
        ))
        .unwrap();
        let mut map = SiteMap::new(vec![Resource::new("posts/2023-07-04-hello.html")]);

        blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(
            destination(&map, "posts/2023-07-04-hello.html"),
            "/2023/07/04/hello/"
        );
    }

    #[test]
    fn test_missing_date_is_error() {
        let mut blog = Blog::new(&config("/posts/:title.html", "/:year/:title/")).unwrap();
        let mut map = SiteMap::new(vec![Resource::new("posts/hello.html")]);

        let err = blog.manipulate_resource_list(&mut map).unwrap_err();
        assert!(matches!(err, BlogError::MissingDate { .. }));
    }

    #[test]
    fn test_slug_falls_back_to_file_stem() {
        let mut blog = Blog::new(&config("/posts/:year/:month.html", "/:year/:title/")).unwrap();
        let mut map = SiteMap::new(vec![dated("posts/2023/07.html", "2023-07-01", &[])]);

        blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(destination(&map, "posts/2023/07.html"), "/2023/07/");
    }

    #[test]
    fn test_pass_resolves_sub_resource() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:title/index.html",
        ))
        .unwrap();
        // Sub-resource listed before its article
        let mut map = SiteMap::new(vec![
            Resource::new("posts/2023-07-04-hello/page2"),
            dated("posts/2023-07-04-hello.html", "2023-07-04", &[]),
        ]);

        let summary = blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(summary.sub_resources, 1);
        assert_eq!(destination(&map, "posts/2023-07-04-hello/page2"), "/2023/hello/page2");
        assert_eq!(
            map.find_resource_by_path("posts/2023-07-04-hello/page2")
                .unwrap()
                .kind,
            ResourceKind::SubResource {
                owner: "posts/2023-07-04-hello.html".into(),
                trailing: "/page2".into(),
            }
        );
    }

    #[test]
    fn test_sub_resource_uses_owner_front_matter() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:month/:title.html",
        ))
        .unwrap();
        let owner = Resource::new("posts/2023-07-04-hello.html").with_front(FrontMatter {
            date: DateTimeUtc::parse("2024-02-03"),
            slug: Some("hi".into()),
            tags: Vec::new(),
        });
        let mut map = SiteMap::new(vec![owner, Resource::new("posts/2023-07-04-hello/img/a.png")]);

        blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(destination(&map, "posts/2023-07-04-hello/img/a.png"), "/2024/02/hi/img/a.png");
    }

    #[test]
    fn test_missing_owner_aborts_pass_without_writes() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:title/",
        ))
        .unwrap();
        let mut map = SiteMap::new(vec![
            dated("posts/2023-07-04-hello.html", "2023-07-04", &[]),
            Resource::new("posts/2023-07-05-gone/page2.html"),
        ]);

        let err = blog.manipulate_resource_list(&mut map).unwrap_err();
        assert!(err.to_string().contains("posts/2023-07-05-gone/page2.html"));
        assert_eq!(
            destination(&map, "posts/2023-07-04-hello.html"),
            "posts/2023-07-04-hello.html"
        );
        assert!(blog.articles().is_empty());
    }

    #[test]
    fn test_unmatched_resources_untouched() {
        let mut blog = Blog::new(&BlogConfig::default()).unwrap();
        let mut map = SiteMap::new(vec![Resource::new("about.html")]);

        let summary = blog.manipulate_resource_list(&mut map).unwrap();
        assert_eq!(summary.untouched, 1);
        let about = map.find_resource_by_path("about.html").unwrap();
        assert_eq!(about.destination_path, "about.html");
        assert_eq!(about.kind, ResourceKind::Plain);
    }

    #[test]
    fn test_index_rebuilt_each_pass() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:title/",
        ))
        .unwrap();

        let mut first = SiteMap::new(vec![
            dated("posts/2023-01-01-a.html", "2023-01-01", &["x"]),
            dated("posts/2023-01-02-b.html", "2023-01-02", &["x"]),
        ]);
        blog.manipulate_resource_list(&mut first).unwrap();
        assert_eq!(blog.articles().len(), 2);

        let mut second = SiteMap::new(vec![dated("posts/2023-01-02-b.html", "2023-01-02", &[])]);
        blog.manipulate_resource_list(&mut second).unwrap();
        assert_eq!(blog.articles().len(), 1);
        assert!(blog.article("posts/2023-01-01-a.html").is_none());
        assert!(blog.tags().is_empty());
    }

    #[test]
    fn test_article_views() {
        let mut blog = Blog::new(&config(
            "/posts/:year-:month-:day-:title.html",
            "/:year/:title/",
        ))
        .unwrap();
        let mut map = SiteMap::new(vec![
            dated("posts/2021-01-01-old.html", "2021-01-01", &["rust"]),
            dated("posts/2023-01-01-new.html", "2023-01-01", &["rust", "web"]),
            Resource::new("about.html"),
        ]);
        blog.manipulate_resource_list(&mut map).unwrap();

        let slugs: Vec<_> = blog.articles().iter().map(|a| a.meta.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old"]);
        assert_eq!(blog.tags()["rust"].len(), 2);
        assert_eq!(
            blog.article("/posts/2023-01-01-new.html").unwrap().destination,
            "/2023/new/"
        );
        assert!(blog.article("about.html").is_none());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("posts/hello.html.md"), "hello");
        assert_eq!(file_stem("hello"), "hello");
        assert_eq!(file_stem("a/b/"), "");
    }
}
