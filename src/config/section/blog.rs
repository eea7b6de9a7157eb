//! `[blog]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [blog]
//! sources = "/posts/:year-:month-:day-:title.html"
//! permalink = "/:year/:month/:title/"
//! index_file = "index.html"
//! ```

use serde::{Deserialize, Serialize};

use crate::blog::{CompiledTemplate, Placeholder};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Where article sources live, with `:year`, `:month`, `:day`, `:title`.
    pub sources: String,
    /// Published URL shape, same placeholders.
    pub permalink: String,
    /// Directory index file name, stripped from sub-resource permalinks.
    pub index_file: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            sources: ":year-:month-:day-:title.html".into(),
            permalink: ":year/:month/:day/:title.html".into(),
            index_file: "index.html".into(),
        }
    }
}

impl BlogConfig {
    pub const SOURCES: FieldPath = FieldPath::new("blog.sources");
    pub const PERMALINK: FieldPath = FieldPath::new("blog.permalink");
    pub const INDEX_FILE: FieldPath = FieldPath::new("blog.index_file");

    /// Collect errors and warnings for this section.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.sources.trim().is_empty() {
            diag.error(Self::SOURCES, "must not be empty");
        }
        if self.permalink.trim().is_empty() {
            diag.error(Self::PERMALINK, "must not be empty");
        }
        if self.index_file.contains('/') {
            diag.error_with_hint(
                Self::INDEX_FILE,
                "must be a file name, not a path",
                "e.g. `index.html`",
            );
        }

        for (field, template) in [(Self::SOURCES, &self.sources), (Self::PERMALINK, &self.permalink)] {
            for token in unknown_placeholders(template) {
                diag.error_with_hint(
                    field,
                    format!("unknown placeholder `{token}`"),
                    "available: `:year`, `:month`, `:day`, `:title`",
                );
            }
        }

        match CompiledTemplate::compile(&self.sources) {
            Ok(template) => {
                if !template.has_placeholders() {
                    diag.warn(
                        Self::SOURCES,
                        "has no placeholders and matches a single fixed path",
                    );
                }
                if template.subdir_pattern().is_none() {
                    diag.warn(
                        Self::SOURCES,
                        "has no trailing extension, sub-resources under articles are not recognized",
                    );
                }
            }
            Err(err) => diag.error(Self::SOURCES, err.to_string()),
        }
    }
}

/// `:word` tokens that do not start with a known placeholder.
fn unknown_placeholders(template: &str) -> Vec<&str> {
    let mut unknown = Vec::new();
    for (at, _) in template.match_indices(':') {
        let rest = &template[at..];
        if Placeholder::ALL.iter().any(|p| rest.starts_with(p.token())) {
            continue;
        }
        let len = rest[1..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len() - 1);
        if len > 0 {
            unknown.push(&rest[..=len]);
        }
    }
    unknown
}
