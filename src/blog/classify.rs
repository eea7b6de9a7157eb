//! Resource classification: article, sub-resource, or neither.

use super::BlogError;
use super::template::{CompiledTemplate, TemplateCaptures};
use crate::resource::{Resource, ResourceLookup, path_key};

/// Outcome of classifying one resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// The path matches the article matcher.
    ///
    /// Carries no fields: date and slug are read from the resource itself.
    Article,
    /// The path lives under an existing article's subdirectory.
    SubResource {
        owner: &'a Resource,
        /// Trailing path, including its leading `/`.
        trailing: String,
    },
    /// Not a blog resource.
    NoMatch,
}

/// Classify a resource path.
///
/// The article matcher is tried first. A subdirectory match rebuilds the
/// owning article's source path from the captures and looks it up; a missing
/// owner is an error, not a silent skip.
pub fn classify<'a, L: ResourceLookup + ?Sized>(
    path: &str,
    template: &CompiledTemplate,
    lookup: &'a L,
) -> Result<Classification<'a>, BlogError> {
    let key = path_key(path);

    if template.match_article(key).is_some() {
        return Ok(Classification::Article);
    }

    let Some(captures) = template.match_subdir(key) else {
        return Ok(Classification::NoMatch);
    };

    let article = template.reconstruct(&captures);
    let owner = lookup
        .find_resource_by_path(&article)
        .ok_or_else(|| BlogError::ArticleNotFound {
            resource: path.to_owned(),
            article,
        })?;

    let TemplateCaptures { path: trailing, .. } = captures;
    Ok(Classification::SubResource {
        owner,
        trailing: trailing.unwrap_or_default(),
    })
}
