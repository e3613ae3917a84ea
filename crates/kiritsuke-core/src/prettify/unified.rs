//! # Unified Prettifier Interface
//!
//! Ties the stages together: extension and group stripping, the shape
//! cascade, fuzzy enrichment against an optional metadata cache, and
//! edition reattachment.

use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::cascade::ShapeCascade;
use super::strip::{strip_extension, GroupStripper};
use crate::enrich::{FuzzyEnricher, MetadataCache};
use crate::error::Result;
use crate::sorting::SortKeyNormalizer;
use crate::types::{Enrichment, PrettifyResult, ShapeCategory};

/// Configuration for the prettifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettifyConfig {
    /// Ask for episode names and build anime search keys.
    pub use_external_info: bool,
    /// Clean up extension, group tag and separators in sort keys.
    pub prettify_for_sorting: bool,
    /// Drop a leading "A" or "The" from sort keys.
    pub ignore_leading_article: bool,
}

impl Default for PrettifyConfig {
    fn default() -> Self {
        Self {
            use_external_info: true,
            prettify_for_sorting: true,
            ignore_leading_article: false,
        }
    }
}

impl PrettifyConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable external episode lookups and anime search keys.
    pub fn with_external_info(mut self, enabled: bool) -> Self {
        self.use_external_info = enabled;
        self
    }

    /// Enable or disable sort-key prettification.
    pub fn with_prettify_for_sorting(mut self, enabled: bool) -> Self {
        self.prettify_for_sorting = enabled;
        self
    }

    /// Enable or disable dropping the leading article from sort keys.
    pub fn with_ignore_leading_article(mut self, enabled: bool) -> Self {
        self.ignore_leading_article = enabled;
        self
    }
}

/// Turns raw media file names into display titles.
///
/// All patterns are compiled once in [`Prettifier::new`]; afterwards the
/// prettifier is immutable and can be shared between threads.
pub struct Prettifier {
    config: PrettifyConfig,
    groups: GroupStripper,
    cascade: ShapeCascade,
    enricher: FuzzyEnricher,
    sorter: SortKeyNormalizer,
    re_whitespace_run: Regex,
    cache: Option<Arc<dyn MetadataCache>>,
}

impl Prettifier {
    /// Create a new prettifier with the given configuration and no cache.
    pub fn new(config: PrettifyConfig) -> Result<Self> {
        Ok(Self {
            config,
            groups: GroupStripper::new()?,
            cascade: ShapeCascade::new()?,
            enricher: FuzzyEnricher::new()?,
            sorter: SortKeyNormalizer::new()?,
            re_whitespace_run: Regex::new(r"\s+")?,
            cache: None,
        })
    }

    /// Create a new prettifier with default configuration.
    pub fn default() -> Result<Self> {
        Self::new(PrettifyConfig::default())
    }

    /// Attach the metadata cache used for enrichment.
    pub fn with_cache(mut self, cache: Arc<dyn MetadataCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PrettifyConfig {
        &self.config
    }

    /// Returns the shape category `raw_name` falls into.
    pub fn classify(&self, raw_name: &str) -> ShapeCategory {
        self.cascade.classify(self.groups.strip(strip_extension(raw_name)))
    }

    /// Prettify a file name into a display title.
    ///
    /// `file` identifies the file in the metadata cache; without it, or
    /// without a cache, no enrichment happens.
    ///
    /// # Examples
    /// ```
    /// use kiritsuke_core::prettify::Prettifier;
    ///
    /// let prettifier = Prettifier::default().unwrap();
    /// assert_eq!(prettifier.prettify("Show.Name.S01E02.720p.HDTV.x264.mkv", None), "Show Name - 102");
    /// assert_eq!(prettifier.prettify("some.movie.2013.BluRay.x264.mkv", None), "Some Movie (2013)");
    /// ```
    pub fn prettify(&self, raw_name: &str, file: Option<&Path>) -> String {
        self.prettify_detailed(raw_name, file).title
    }

    /// Prettify a file name and report how the title was derived.
    pub fn prettify_detailed(&self, raw_name: &str, file: Option<&Path>) -> PrettifyResult {
        let mut result = PrettifyResult::new(raw_name);

        let name = self.groups.strip(strip_extension(raw_name));
        let draft = self.cascade.run(name, self.config.use_external_info);

        let mut title = self.re_whitespace_run.replace_all(&draft.name, " ").into_owned();
        let mut enrichment = Enrichment::NotAttempted;
        if draft.intent.wants_lookup() {
            if let (Some(cache), Some(file)) = (self.cache.as_deref(), file) {
                (title, enrichment) = self.enricher.enrich(cache, file, &title, &draft.intent);
            }
        }

        let mut title = title.trim().to_string();
        if let Some(ref edition) = draft.edition {
            if let Some(stripped) = title.strip_suffix(" -") {
                title.truncate(stripped.len());
            }
            title.push(' ');
            title.push_str(edition);
        }

        trace!(input = raw_name, title = %title, %enrichment, "prettified");

        result.title = title;
        result.category = draft.category;
        result.intent = draft.intent;
        result.edition = draft.edition;
        result.enrichment = enrichment;
        result
    }

    /// Builds the sort key for `raw_name` using the configured flags.
    pub fn sort_key(&self, raw_name: &str) -> String {
        self.sorter.normalize(
            raw_name,
            self.config.prettify_for_sorting,
            self.config.ignore_leading_article,
        )
    }
}
