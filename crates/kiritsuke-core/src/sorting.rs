//! Sort keys for file names.
//!
//! A sort key is a lightweight cleanup of the raw name, not a full
//! prettification: a media extension and the group tag go, separators become
//! spaces, and optionally a leading English article is dropped so
//! "The Wire" sorts under W.

use regex::Regex;

use crate::error::Result;
use crate::prettify::strip::GroupStripper;

/// Container, subtitle and sidecar extensions removed from sort keys.
const MEDIA_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "m4v", "avi", "mov", "wmv", "mpg", "mpeg", "ts", "m2ts", "webm", "flv", "ogm",
    "divx", "rmvb", "vob", "iso", "srt", "ass", "ssa", "sub", "idx", "nfo",
];

/// Produces sort keys from raw file names.
#[derive(Debug, Clone)]
pub struct SortKeyNormalizer {
    groups: GroupStripper,
    re_extension: Regex,
    re_leading_article: Regex,
    re_whitespace_run: Regex,
}

impl SortKeyNormalizer {
    /// Compiles the normalization patterns.
    ///
    /// # Errors
    ///
    /// Returns `KiritsukeError::RegexError` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            groups: GroupStripper::new()?,
            re_extension: Regex::new(&format!(r"(?i)\.(?:{})$", MEDIA_EXTENSIONS.join("|")))?,
            re_leading_article: Regex::new(r"^(?:[Aa]|[Tt]he)[ .]")?,
            re_whitespace_run: Regex::new(r"\s{2,}")?,
        })
    }

    /// Builds the sort key for `raw`.
    ///
    /// With `prettify` a known media extension and the group tag are removed
    /// and periods and underscores become spaces. With `ignore_article` a
    /// leading "A" or "The" is dropped and whitespace runs are collapsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiritsuke_core::sorting::SortKeyNormalizer;
    ///
    /// let sorter = SortKeyNormalizer::new().unwrap();
    /// assert_eq!(sorter.normalize("The.Wire.S01E01.mkv", true, true), "Wire S01E01");
    /// ```
    pub fn normalize(&self, raw: &str, prettify: bool, ignore_article: bool) -> String {
        let mut key = raw.to_string();

        if prettify {
            key = self.re_extension.replace(&key, "").into_owned();
            key = self.groups.strip(&key).replace(['.', '_'], " ");
        }

        if ignore_article {
            key = self.re_leading_article.replace(&key, "").into_owned();
            key = self.re_whitespace_run.replace_all(&key, " ").into_owned();
        }

        key
    }
}
