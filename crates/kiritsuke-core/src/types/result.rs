use serde::{Deserialize, Serialize};

use super::intent::LookupIntent;
use super::metadata::Enrichment;
use super::shape::ShapeCategory;

/// The primary output of the Kiritsuke prettifier.
///
/// Carries the display title together with everything the cascade decided
/// on the way, so callers can inspect why a name came out the way it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrettifyResult {
    /// Original input string.
    pub input: String,

    /// Final human-presentable title, edition included.
    pub title: String,

    /// Shape rule that matched the name.
    pub category: ShapeCategory,

    /// Lookup flags and search key raised by the shape rule.
    pub intent: LookupIntent,

    /// Parenthesized edition marker, e.g. `"(Directors Cut)"`.
    pub edition: Option<String>,

    /// Outcome of the metadata cache merge.
    pub enrichment: Enrichment,
}

impl PrettifyResult {
    /// Creates an unclassified result whose title is still empty.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            title: String::new(),
            category: ShapeCategory::Unclassified,
            intent: LookupIntent::default(),
            edition: None,
            enrichment: Enrichment::NotAttempted,
        }
    }

    /// Returns `true` if an edition marker was found and reattached.
    #[must_use]
    pub fn has_edition(&self) -> bool {
        self.edition.is_some()
    }
}

impl std::fmt::Display for PrettifyResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrettifyResult(title={:?}", self.title)?;
        write!(f, ", shape={}", self.category)?;
        if let Some(ref key) = self.intent.search_key {
            write!(f, ", key={key:?}")?;
        }
        if let Some(ref edition) = self.edition {
            write!(f, ", edition={edition}")?;
        }
        write!(f, ", enrichment={}", self.enrichment)?;
        write!(f, ")")
    }
}
