//! URL path type for published destination paths.
//!
//! Every destination path written by the blog goes through
//! [`UrlPath::normalize`], so two permalinks that only differ by
//! redundant slashes or dot segments compare equal.

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Normalized URL path
///
/// Invariants:
/// - Always starts with `/`
/// - No empty, `.` or `..` segments
/// - A trailing `/` is kept when the input ended in a directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Normalize a raw path.
    ///
    /// - `//` collapses to `/`
    /// - leading slash is added when missing
    /// - `.` segments are dropped, `..` removes the previous segment
    ///   (never climbing above root)
    ///
    /// ```ignore
    /// assert_eq!(UrlPath::normalize("2023//07/./hello/").as_str(), "/2023/07/hello/");
    /// assert_eq!(UrlPath::normalize("/a/b/../c").as_str(), "/a/c");
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();

        let mut segments: Vec<&str> = Vec::new();
        let mut is_dir = false;
        for segment in trimmed.split('/') {
            match segment {
                "" | "." => is_dir = true,
                ".." => {
                    segments.pop();
                    is_dir = true;
                }
                s => {
                    segments.push(s);
                    is_dir = false;
                }
            }
        }

        if segments.is_empty() {
            return Self(Arc::from("/"));
        }

        let mut normalized = String::with_capacity(trimmed.len() + 2);
        for segment in &segments {
            normalized.push('/');
            normalized.push_str(segment);
        }
        if is_dir {
            normalized.push('/');
        }

        Self(Arc::from(normalized))
    }

    /// Get the URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::normalize("/")
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<UrlPath> for String {
    fn from(url: UrlPath) -> Self {
        url.0.as_ref().to_owned()
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::normalize(&s))
    }
}
