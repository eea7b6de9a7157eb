//! Source path template compiler.
//!
//! A source template such as `/posts/:year-:month-:day-:title.html` is split
//! into an ordered list of [`Segment`]s in a single pass. Literal segments are
//! regex-escaped on their own and placeholders become named capture groups,
//! so no substitution step can ever rewrite the output of another one.
//!
//! # Matchers
//!
//! ```text
//! template:  /posts/:year-:month-:day-:title.html
//! article:   ^posts/(?P<year>\d{4})\-(?P<month>\d{2})\-(?P<day>\d{2})\-(?P<title>[^/]+)\.html
//! subdir:    ^posts/(?P<year>\d{4})\-(?P<month>\d{2})\-(?P<day>\d{2})\-(?P<title>[^/]+)(?P<path>/.*)$
//! ```
//!
//! The article matcher is anchored at the start only, so rendering-engine
//! extensions appended to a resource path (`hello.html.md`) still match.
//!
//! # Limitations
//!
//! The subdirectory matcher needs a final `.ext` in the template to know where
//! the article's own directory begins. A template ending in a placeholder or a
//! bare directory has no subdirectory matcher at all, and sub-resources are
//! never recognized for it.
//!
//! This includes a dot followed by a final placeholder, as in
//! `/posts/:year.:title`. Cutting at that dot would drop `:title` from the
//! subdirectory matcher, so the owning article's path could not be rebuilt
//! and every `posts/<year>/...` resource would fail as an orphan.

use std::borrow::Cow;

use regex::{Captures, Regex};

use super::BlogError;
use crate::debug;

/// Name of the capture group holding a sub-resource's trailing path.
pub const PATH_GROUP: &str = "path";

/// A named field usable in source and permalink templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Year,
    Month,
    Day,
    Title,
}

impl Placeholder {
    pub const ALL: [Self; 4] = [Self::Year, Self::Month, Self::Day, Self::Title];

    /// Token as written in a template, e.g. `:year`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Year => ":year",
            Self::Month => ":month",
            Self::Day => ":day",
            Self::Title => ":title",
        }
    }

    /// Capture group name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Title => "title",
        }
    }

    /// Regex fragment matched by this placeholder.
    const fn pattern(self) -> &'static str {
        match self {
            Self::Year => r"\d{4}",
            Self::Month | Self::Day => r"\d{2}",
            Self::Title => r"[^/]+",
        }
    }

    /// Placeholder starting at the beginning of `s`, if any.
    fn at_start_of(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| s.starts_with(p.token()))
    }
}

/// One piece of a tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// Split a template into literal and placeholder segments.
///
/// Tokens are recognized wherever they occur (`:years` is `:year` + `s`).
/// Adjacent literal characters are merged into one segment.
///
/// ```ignore
/// tokenize("/:year/:title.html")
/// // [Literal("/"), Placeholder(Year), Literal("/"), Placeholder(Title), Literal(".html")]
/// ```
pub fn tokenize(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        if c == ':'
            && let Some(placeholder) = Placeholder::at_start_of(rest)
        {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(placeholder));
            rest = &rest[placeholder.token().len()..];
            continue;
        }
        literal.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Join segments back into a string, rendering each kind with its own callback.
pub fn render<'a>(
    segments: &'a [Segment],
    mut literal: impl FnMut(&'a str) -> Cow<'a, str>,
    mut placeholder: impl FnMut(Placeholder) -> Cow<'a, str>,
) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&literal(text)),
            Segment::Placeholder(p) => out.push_str(&placeholder(*p)),
        }
    }
    out
}

/// Raw string captures from a matched source path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCaptures {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub title: Option<String>,
    /// Trailing sub-path (subdirectory matcher only), including its leading `/`.
    pub path: Option<String>,
}

impl TemplateCaptures {
    fn from_captures(caps: &Captures<'_>) -> Self {
        let get = |name: &str| caps.name(name).map(|m| m.as_str().to_owned());
        Self {
            year: get(Placeholder::Year.name()),
            month: get(Placeholder::Month.name()),
            day: get(Placeholder::Day.name()),
            title: get(Placeholder::Title.name()),
            path: get(PATH_GROUP),
        }
    }

    /// Captured value for a placeholder.
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        match placeholder {
            Placeholder::Year => self.year.as_deref(),
            Placeholder::Month => self.month.as_deref(),
            Placeholder::Day => self.day.as_deref(),
            Placeholder::Title => self.title.as_deref(),
        }
    }
}

/// Article and subdirectory matchers compiled from one source template.
///
/// Matching is done against paths without a leading slash; the template's own
/// leading slash is dropped at compile time.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    source: String,
    segments: Vec<Segment>,
    article: Regex,
    subdir: Option<Regex>,
}

impl CompiledTemplate {
    /// Compile a source template.
    ///
    /// Never fails for a template without placeholders: it simply matches
    /// one fixed path.
    pub fn compile(template: &str) -> Result<Self, BlogError> {
        let segments = tokenize(template.strip_prefix('/').unwrap_or(template));

        let article_pattern = format!("^{}", group_pattern(&segments));
        let article = build_regex(template, &article_pattern)?;

        let subdir = match subdir_pattern(&segments) {
            Some(pattern) => Some(build_regex(template, &format!("^{pattern}"))?),
            None => {
                debug!("blog"; "`{}` has no trailing extension, sub-resources disabled", template);
                None
            }
        };

        Ok(Self {
            source: template.to_owned(),
            segments,
            article,
            subdir,
        })
    }

    /// Template string as configured.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn article_pattern(&self) -> &str {
        self.article.as_str()
    }

    pub fn subdir_pattern(&self) -> Option<&str> {
        self.subdir.as_ref().map(Regex::as_str)
    }

    /// Whether the template contains at least one placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(_)))
    }

    /// Match a (leading-slash stripped) path against the article matcher.
    pub fn match_article(&self, path: &str) -> Option<TemplateCaptures> {
        self.article
            .captures(path)
            .map(|caps| TemplateCaptures::from_captures(&caps))
    }

    /// Match a (leading-slash stripped) path against the subdirectory matcher.
    pub fn match_subdir(&self, path: &str) -> Option<TemplateCaptures> {
        self.subdir
            .as_ref()?
            .captures(path)
            .map(|caps| TemplateCaptures::from_captures(&caps))
    }

    /// Rebuild a source path by substituting raw captures into the template.
    ///
    /// The result has no leading slash, like the paths this template matches.
    pub fn reconstruct(&self, captures: &TemplateCaptures) -> String {
        render(
            &self.segments,
            Cow::Borrowed,
            |p| Cow::Owned(captures.get(p).unwrap_or_default().to_owned()),
        )
    }
}

fn build_regex(template: &str, pattern: &str) -> Result<Regex, BlogError> {
    Regex::new(pattern).map_err(|source| BlogError::Pattern {
        template: template.to_owned(),
        source,
    })
}

/// Escaped literals joined with capture groups.
///
/// The regex engine rejects duplicate group names, so a placeholder that
/// appears more than once is only captured at its first occurrence.
fn group_pattern(segments: &[Segment]) -> String {
    let mut seen: Vec<Placeholder> = Vec::with_capacity(4);
    render(
        segments,
        |text| Cow::Owned(regex::escape(text)),
        |p| {
            if seen.contains(&p) {
                Cow::Owned(format!("(?:{})", p.pattern()))
            } else {
                seen.push(p);
                Cow::Owned(format!("(?P<{}>{})", p.name(), p.pattern()))
            }
        },
    )
}

/// Pattern with the final `.ext` replaced by the trailing-path group.
///
/// Returns `None` when the last segment is not a literal ending in an
/// extension (no `/` or `.` after the last dot).
fn subdir_pattern(segments: &[Segment]) -> Option<String> {
    let (last, init) = segments.split_last()?;
    let Segment::Literal(text) = last else {
        return None;
    };
    let dot = text.rfind('.')?;
    let ext = &text[dot + 1..];
    if ext.is_empty() || ext.contains('/') {
        return None;
    }

    Some(format!(
        "{}{}(?P<{PATH_GROUP}>/.*)$",
        group_pattern(init),
        regex::escape(&text[..dot])
    ))
}
