//! Blog resolution errors.

use thiserror::Error;

/// Errors that abort a blog pass.
#[derive(Debug, Error)]
pub enum BlogError {
    /// A sub-resource points at an article that is not in the sitemap.
    #[error("article for `{resource}` not found (expected source `{article}`)")]
    ArticleNotFound { resource: String, article: String },

    /// An article has no date in front matter and none in its path.
    #[error(
        "article `{path}` has no date: set `date` in front matter or use :year, :month and :day in `sources`"
    )]
    MissingDate { path: String },

    #[error("invalid pattern compiled from `{template}`")]
    Pattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}
