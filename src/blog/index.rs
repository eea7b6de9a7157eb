//! Article index rebuilt on every blog pass.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::UrlPath;
use crate::resource::{ArticleMeta, path_key};
use crate::utils::date::DateTimeUtc;

/// A classified article with its resolved destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Source path.
    pub path: String,
    pub destination: UrlPath,
    #[serde(flatten)]
    pub meta: ArticleMeta,
}

impl Article {
    pub fn new(path: impl Into<String>, destination: UrlPath, meta: ArticleMeta) -> Self {
        Self {
            path: path.into(),
            destination,
            meta,
        }
    }

    #[inline]
    pub fn date(&self) -> DateTimeUtc {
        self.meta.date
    }
}

/// Articles of one pass, in sitemap order.
///
/// Never patched in place: each pass builds a new index and replaces the old one.
#[derive(Debug, Default)]
pub struct ArticleIndex {
    articles: Vec<Article>,
    by_path: FxHashMap<String, usize>,
}

impl ArticleIndex {
    pub fn new(articles: Vec<Article>) -> Self {
        let by_path = articles
            .iter()
            .enumerate()
            .map(|(i, a)| (path_key(&a.path).to_owned(), i))
            .collect();
        Self { articles, by_path }
    }

    /// All articles, newest first. Articles sharing a date keep sitemap order.
    pub fn articles(&self) -> Vec<&Article> {
        sorted_by_date_desc(self.articles.iter().collect())
    }

    /// Tag name to articles carrying it, each group newest first.
    pub fn tags_index(&self) -> BTreeMap<&str, Vec<&Article>> {
        let mut tags: BTreeMap<&str, Vec<&Article>> = BTreeMap::new();
        for article in &self.articles {
            for tag in &article.meta.tags {
                tags.entry(tag.as_str()).or_default().push(article);
            }
        }
        for group in tags.values_mut() {
            *group = sorted_by_date_desc(std::mem::take(group));
        }
        tags
    }

    /// Article with the given source path.
    pub fn find_article(&self, path: &str) -> Option<&Article> {
        self.by_path
            .get(path_key(path))
            .and_then(|&i| self.articles.get(i))
    }
}

/// Stable sort, newest first.
fn sorted_by_date_desc(mut articles: Vec<&Article>) -> Vec<&Article> {
    articles.sort_by(|a, b| b.date().cmp(&a.date()));
    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(path: &str, date: (u16, u8, u8), tags: &[&str]) -> Article {
        Article::new(
            path,
            UrlPath::normalize(path),
            ArticleMeta {
                date: DateTimeUtc::from_ymd(date.0, date.1, date.2),
                slug: path.to_owned(),
                tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            },
        )
    }

    fn paths<'a>(articles: &[&'a Article]) -> Vec<&'a str> {
        articles.iter().map(|a| a.path.as_str()).collect()
    }

    #[test]
    fn test_articles_newest_first() {
        let index = ArticleIndex::new(vec![
            article("a", (2022, 1, 1), &[]),
            article("b", (2024, 1, 1), &[]),
            article("c", (2023, 1, 1), &[]),
        ]);
        assert_eq!(paths(&index.articles()), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_articles_ties_keep_sitemap_order() {
        let index = ArticleIndex::new(vec![
            article("first", (2023, 5, 5), &[]),
            article("newer", (2024, 1, 1), &[]),
            article("second", (2023, 5, 5), &[]),
            article("third", (2023, 5, 5), &[]),
        ]);
        assert_eq!(
            paths(&index.articles()),
            vec!["newer", "first", "second", "third"]
        );
    }

    #[test]
    fn test_resorting_sorted_sequence_is_stable() {
        let index = ArticleIndex::new(vec![
            article("x", (2024, 1, 1), &[]),
            article("y", (2023, 1, 1), &[]),
            article("z", (2023, 1, 1), &[]),
        ]);
        let once = index.articles();
        let twice = sorted_by_date_desc(once.clone());
        assert_eq!(paths(&once), paths(&twice));
    }

    #[test]
    fn test_tags_index_groups_and_sorts() {
        let index = ArticleIndex::new(vec![
            article("old", (2021, 1, 1), &["rust", "web"]),
            article("new", (2024, 1, 1), &["rust"]),
            article("mid", (2022, 1, 1), &["web"]),
        ]);
        let tags = index.tags_index();
        assert_eq!(tags.keys().copied().collect::<Vec<_>>(), vec!["rust", "web"]);
        assert_eq!(paths(&tags["rust"]), vec!["new", "old"]);
        assert_eq!(paths(&tags["web"]), vec!["mid", "old"]);
    }

    #[test]
    fn test_article_in_every_tag_group() {
        let index = ArticleIndex::new(vec![article("a", (2021, 1, 1), &["x", "y", "z"])]);
        let tags = index.tags_index();
        assert_eq!(tags.len(), 3);
        assert!(tags.values().all(|group| paths(group) == vec!["a"]));
    }

    #[test]
    fn test_find_article() {
        let index = ArticleIndex::new(vec![article("posts/a.html", (2021, 1, 1), &[])]);
        assert!(index.find_article("posts/a.html").is_some());
        assert!(index.find_article("/posts/a.html").is_some());
        assert!(index.find_article("posts/b.html").is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = ArticleIndex::default();
        assert!(index.articles().is_empty());
        assert!(index.tags_index().is_empty());
    }
}
