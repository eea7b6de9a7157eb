//! Destination path resolution from a permalink template.
//!
//! ```text
//! permalink:  /:year/:month/:title/
//! article:    date 2023-07-04, slug hello   -> /2023/07/hello/
//! sub:        trailing /page2               -> /2023/07/hello/page2
//! ```

use std::borrow::Cow;

use super::template::{Placeholder, render, tokenize};
use crate::core::UrlPath;
use crate::debug;
use crate::resource::ArticleMeta;

/// Values substituted into a permalink template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields<'a> {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub title: &'a str,
}

impl<'a> ArticleFields<'a> {
    pub fn from_meta(meta: &'a ArticleMeta) -> Self {
        Self {
            year: meta.date.year,
            month: meta.date.month,
            day: meta.date.day,
            title: &meta.slug,
        }
    }

    /// Rendered value for a placeholder: month and day are always two digits.
    fn value(&self, placeholder: Placeholder) -> Cow<'a, str> {
        match placeholder {
            Placeholder::Year => Cow::Owned(self.year.to_string()),
            Placeholder::Month => Cow::Owned(format!("{:02}", self.month)),
            Placeholder::Day => Cow::Owned(format!("{:02}", self.day)),
            Placeholder::Title => Cow::Borrowed(self.title),
        }
    }
}

/// How a sub-resource's trailing path is spliced into its owner's permalink.
///
/// Variants are listed in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailRule {
    /// `/2023/hello/index.html` -> replace `/index.html`
    IndexFile,
    /// `/2023/hello.html` -> replace `.html`
    Extension,
    /// `/2023/hello/` -> replace the final `/`
    TrailingSlash,
}

impl TailRule {
    pub const ALL: [Self; 3] = [Self::IndexFile, Self::Extension, Self::TrailingSlash];

    /// Byte offset where this rule's match starts in `path`, if it applies.
    fn match_start(self, path: &str, index_file: &str) -> Option<usize> {
        match self {
            Self::IndexFile => {
                let stem = path.strip_suffix(index_file)?;
                (!index_file.is_empty() && stem.ends_with('/')).then(|| stem.len() - 1)
            }
            // last dot of the final segment, followed by at least one character
            Self::Extension => path
                .rfind('.')
                .filter(|&dot| dot + 1 < path.len() && !path[dot..].contains('/')),
            Self::TrailingSlash => path.ends_with('/').then(|| path.len() - 1),
        }
    }
}

/// Substitute fields into a permalink template, without normalizing.
pub fn substitute(permalink: &str, fields: &ArticleFields<'_>) -> String {
    let segments = tokenize(permalink);
    render(&segments, Cow::Borrowed, |p| fields.value(p))
}

/// Destination path of an article.
pub fn resolve_article_path(permalink: &str, fields: &ArticleFields<'_>) -> UrlPath {
    UrlPath::normalize(&substitute(permalink, fields))
}

/// Destination path of a sub-resource under the article described by `owner`.
///
/// The first applicable [`TailRule`] is replaced by `trailing`. When several
/// rules apply the choice is logged, since precedence alone decides it. With
/// no applicable rule the trailing path is appended.
pub fn resolve_subresource_path(
    permalink: &str,
    owner: &ArticleFields<'_>,
    trailing: &str,
    index_file: &str,
) -> UrlPath {
    let path = substitute(permalink, owner);

    let applicable: Vec<(TailRule, usize)> = TailRule::ALL
        .into_iter()
        .filter_map(|rule| rule.match_start(&path, index_file).map(|at| (rule, at)))
        .collect();

    let spliced = match applicable.first() {
        Some(&(rule, at)) => {
            if applicable.len() > 1 {
                debug!(
                    "permalink";
                    "`{}` matches {:?}, using {:?}",
                    path,
                    applicable.iter().map(|(r, _)| *r).collect::<Vec<_>>(),
                    rule
                );
            }
            format!("{}{}", &path[..at], trailing)
        }
        None => format!("{path}{trailing}"),
    };

    UrlPath::normalize(&spliced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> ArticleFields<'static> {
        ArticleFields {
            year: 2023,
            month: 7,
            day: 4,
            title: "hello",
        }
    }

    #[test]
    fn test_resolve_article_path() {
        assert_eq!(
            resolve_article_path("/:year/:month/:title/", &hello()),
            "/2023/07/hello/"
        );
    }

    #[test]
    fn test_zero_padding_everywhere() {
        let fields = ArticleFields {
            year: 2023,
            month: 9,
            day: 1,
            title: "x",
        };
        assert_eq!(substitute(":month-:day/:day/:month", &fields), "09-01/01/09");
    }

    #[test]
    fn test_two_digit_values_unchanged() {
        let fields = ArticleFields {
            year: 2023,
            month: 12,
            day: 31,
            title: "x",
        };
        assert_eq!(substitute(":year:month:day", &fields), "20231231");
    }

    #[test]
    fn test_article_path_is_normalized() {
        assert_eq!(
            resolve_article_path(":year//:title/./", &hello()),
            "/2023/hello/"
        );
    }

    #[test]
    fn test_slug_containing_placeholder_text_is_not_expanded() {
        let fields = ArticleFields {
            title: ":year",
            ..hello()
        };
        assert_eq!(resolve_article_path("/:title/:year/", &fields), "/:year/2023/");
    }

    #[test]
    fn test_subresource_index_file_rule() {
        let path = resolve_subresource_path("/:year/:title/index.html", &hello(), "/page2", "index.html");
        assert_eq!(path, "/2023/hello/page2");
    }

    #[test]
    fn test_subresource_extension_rule() {
        let path = resolve_subresource_path("/:year/:title.html", &hello(), "/page2.html", "index.html");
        assert_eq!(path, "/2023/hello/page2.html");
    }

    #[test]
    fn test_subresource_trailing_slash_rule() {
        let path = resolve_subresource_path("/:year/:month/:title/", &hello(), "/page2", "index.html");
        assert_eq!(path, "/2023/07/hello/page2");
    }

    #[test]
    fn test_subresource_no_rule_appends() {
        let path = resolve_subresource_path("/:year/:title", &hello(), "/page2", "index.html");
        assert_eq!(path, "/2023/hello/page2");
    }

    #[test]
    fn test_tail_rule_precedence() {
        let path = "/2023/hello/index.html";
        assert_eq!(TailRule::IndexFile.match_start(path, "index.html"), Some(11));
        assert_eq!(TailRule::Extension.match_start(path, "index.html"), Some(17));
        assert_eq!(TailRule::TrailingSlash.match_start(path, "index.html"), None);
    }

    #[test]
    fn test_extension_rule_stays_in_final_segment() {
        let path = "/2023/v1.2-release/";
        assert_eq!(TailRule::Extension.match_start(path, "index.html"), None);
        assert_eq!(TailRule::TrailingSlash.match_start(path, "index.html"), Some(18));
        assert_eq!(TailRule::Extension.match_start("/blog.v2/2023/hello", "index.html"), None);
    }

    #[test]
    fn test_subresource_dotted_slug_keeps_title() {
        let release = |title: &'static str| ArticleFields {
            title,
            ..hello()
        };
        let a = resolve_subresource_path("/:year/:title/", &release("v1.2-release"), "/page2", "index.html");
        let b = resolve_subresource_path("/:year/:title/", &release("v1.3-release"), "/page2", "index.html");
        assert_eq!(a, "/2023/v1.2-release/page2");
        assert_eq!(b, "/2023/v1.3-release/page2");
    }

    #[test]
    fn test_subresource_dotted_directory() {
        let path = resolve_subresource_path("/blog.v2/:year/:title/", &hello(), "/page2", "index.html");
        assert_eq!(path, "/blog.v2/2023/hello/page2");
    }

    #[test]
    fn test_dotted_slug_with_extension_permalink() {
        let fields = ArticleFields {
            title: "v1.2",
            ..hello()
        };
        let path = resolve_subresource_path("/:year/:title.html", &fields, "/page2", "index.html");
        assert_eq!(path, "/2023/v1.2/page2");
    }

    #[test]
    fn test_index_rule_needs_directory_boundary() {
        assert_eq!(
            TailRule::IndexFile.match_start("/2023/myindex.html", "index.html"),
            None
        );
        assert_eq!(TailRule::IndexFile.match_start("/2023/", ""), None);
    }

    #[test]
    fn test_extension_rule_needs_content_after_dot() {
        assert_eq!(TailRule::Extension.match_start("/2023/hello.", "index.html"), None);
        assert_eq!(TailRule::Extension.match_start("/2023/hello", "index.html"), None);
    }

    #[test]
    fn test_custom_index_file() {
        let path = resolve_subresource_path("/:title/default.htm", &hello(), "/2", "default.htm");
        assert_eq!(path, "/hello/2");
    }
}
